//! Content service for the three content stores.
//!
//! Post, art, and video stores share one contract: non-empty payload on
//! create, owner-only delete with full cascade, newest-first listings.

use chrono::Utc;
use newlands_common::{AppError, AppResult, IdGenerator};
use newlands_db::{
    entities::{art, post, video, ContentItem, ContentKind},
    repositories::{ArtRepository, ContentRepository, PostRepository, UserRepository, VideoRepository},
};
use sea_orm::Set;

/// Content service for business logic.
#[derive(Clone)]
pub struct ContentService {
    post_repo: PostRepository,
    art_repo: ArtRepository,
    video_repo: VideoRepository,
    content_repo: ContentRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl ContentService {
    /// Create a new content service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        art_repo: ArtRepository,
        video_repo: VideoRepository,
        content_repo: ContentRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            post_repo,
            art_repo,
            video_repo,
            content_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a text post.
    pub async fn create_post(&self, owner_id: &str, text: &str) -> AppResult<post::Model> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("post text cannot be empty".to_string()));
        }

        let owner = self.user_repo.get_by_id(owner_id).await?;

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner.id),
            text: Set(text.to_string()),
            created_at: Set(Utc::now().into()),
        };

        self.post_repo.create(model).await
    }

    /// Create an art piece from a stored media reference.
    pub async fn create_art(&self, owner_id: &str, media_url: &str) -> AppResult<art::Model> {
        if media_url.trim().is_empty() {
            return Err(AppError::Validation(
                "art requires a stored media reference".to_string(),
            ));
        }

        let owner = self.user_repo.get_by_id(owner_id).await?;

        let model = art::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner.id),
            media_url: Set(media_url.to_string()),
            created_at: Set(Utc::now().into()),
        };

        self.art_repo.create(model).await
    }

    /// Create a video from a stored media reference.
    pub async fn create_video(&self, owner_id: &str, media_url: &str) -> AppResult<video::Model> {
        if media_url.trim().is_empty() {
            return Err(AppError::Validation(
                "video requires a stored media reference".to_string(),
            ));
        }

        let owner = self.user_repo.get_by_id(owner_id).await?;

        let model = video::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner.id),
            media_url: Set(media_url.to_string()),
            view_count: Set(0),
            created_at: Set(Utc::now().into()),
        };

        self.video_repo.create(model).await
    }

    /// Delete a content item. Only the owner may do this; the item's
    /// comments and likes go with it in one transaction.
    pub async fn delete(&self, kind: ContentKind, id: &str, requester_id: &str) -> AppResult<()> {
        let item = self.content_repo.get_item(kind, id).await?;

        if item.owner_id() != requester_id {
            return Err(AppError::Forbidden(
                "only the owner can delete content".to_string(),
            ));
        }

        self.content_repo.delete_cascade(kind, id).await?;
        tracing::debug!(kind = %kind, content_id = %id, "Deleted content with dependents");
        Ok(())
    }

    /// A user's content of one kind, newest first.
    pub async fn list_by_owner(
        &self,
        kind: ContentKind,
        owner_id: &str,
    ) -> AppResult<Vec<ContentItem>> {
        let owner = self.user_repo.get_by_id(owner_id).await?;

        let items = match kind {
            ContentKind::Post => self
                .post_repo
                .find_by_user(&owner.id)
                .await?
                .into_iter()
                .map(ContentItem::Post)
                .collect(),
            ContentKind::Art => self
                .art_repo
                .find_by_user(&owner.id)
                .await?
                .into_iter()
                .map(ContentItem::Art)
                .collect(),
            ContentKind::Video => self
                .video_repo
                .find_by_user(&owner.id)
                .await?
                .into_iter()
                .map(ContentItem::Video)
                .collect(),
        };
        Ok(items)
    }

    /// All content of one kind, newest first.
    pub async fn list_recent(&self, kind: ContentKind) -> AppResult<Vec<ContentItem>> {
        let items = match kind {
            ContentKind::Post => self
                .post_repo
                .find_recent()
                .await?
                .into_iter()
                .map(ContentItem::Post)
                .collect(),
            ContentKind::Art => self
                .art_repo
                .find_recent()
                .await?
                .into_iter()
                .map(ContentItem::Art)
                .collect(),
            ContentKind::Video => self
                .video_repo
                .find_recent()
                .await?
                .into_iter()
                .map(ContentItem::Video)
                .collect(),
        };
        Ok(items)
    }

    /// Record a playback of a video and return the new view count.
    pub async fn record_view(&self, video_id: &str) -> AppResult<i64> {
        self.video_repo.increment_views(video_id).await
    }
}
