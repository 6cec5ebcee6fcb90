//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod comment;
pub mod content;
pub mod follow;
pub mod like;
pub mod notification;
pub mod user;

pub use account::{AccountService, SignupInput, UpdateProfileInput};
pub use comment::CommentService;
pub use content::ContentService;
pub use follow::FollowService;
pub use like::{LikeService, LikeState};
pub use notification::NotificationService;
pub use user::UserService;
