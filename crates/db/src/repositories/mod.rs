//! Database repositories.

pub mod art;
pub mod comment;
pub mod content;
pub mod follow;
pub mod like;
pub mod notification;
pub mod post;
pub mod user;
pub mod video;

pub use art::ArtRepository;
pub use comment::{CommentRepository, CommentView, NewComment};
pub use content::ContentRepository;
pub use follow::FollowRepository;
pub use like::LikeRepository;
pub use notification::NotificationRepository;
pub use post::PostRepository;
pub use user::UserRepository;
pub use video::VideoRepository;
