//! `SeaORM` entities.

#![allow(missing_docs)]

pub mod art;
pub mod art_comment;
pub mod content;
pub mod follow;
pub mod like;
pub mod notification;
pub mod post;
pub mod post_comment;
pub mod user;
pub mod video;
pub mod video_comment;

pub use art::Entity as Art;
pub use art_comment::Entity as ArtComment;
pub use content::{ContentItem, ContentKind};
pub use follow::Entity as Follow;
pub use like::Entity as Like;
pub use notification::Entity as Notification;
pub use post::Entity as Post;
pub use post_comment::Entity as PostComment;
pub use user::Entity as User;
pub use video::Entity as Video;
pub use video_comment::Entity as VideoComment;
