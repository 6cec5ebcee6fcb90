//! Cross-kind content repository.
//!
//! The one place where a lookup or delete must be dispatched on the
//! content-kind discriminator instead of a single table.

use std::sync::Arc;

use crate::entities::{
    art_comment, like, post_comment, video_comment, Art, ArtComment, ContentItem, ContentKind,
    Like, Post, PostComment, Video, VideoComment,
};
use newlands_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};

/// Content repository for operations spanning the three content tables.
#[derive(Clone)]
pub struct ContentRepository {
    db: Arc<DatabaseConnection>,
}

impl ContentRepository {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a content item by kind and ID.
    pub async fn find_item(&self, kind: ContentKind, id: &str) -> AppResult<Option<ContentItem>> {
        let item = match kind {
            ContentKind::Post => Post::find_by_id(id)
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .map(ContentItem::Post),
            ContentKind::Art => Art::find_by_id(id)
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .map(ContentItem::Art),
            ContentKind::Video => Video::find_by_id(id)
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .map(ContentItem::Video),
        };
        Ok(item)
    }

    /// Find a content item by kind and ID, returning an error if not found.
    pub async fn get_item(&self, kind: ContentKind, id: &str) -> AppResult<ContentItem> {
        self.find_item(kind, id)
            .await?
            .ok_or_else(|| AppError::ContentNotFound(id.to_string()))
    }

    /// Delete a content item together with its comments and likes.
    ///
    /// Comments would also fall to the foreign-key cascade, but likes only
    /// reference the item by discriminator, so all three deletes run in one
    /// transaction: either the item and every dependent disappear, or none
    /// do.
    pub async fn delete_cascade(&self, kind: ContentKind, id: &str) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match kind {
            ContentKind::Post => {
                PostComment::delete_many()
                    .filter(post_comment::Column::PostId.eq(id))
                    .exec(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
            ContentKind::Art => {
                ArtComment::delete_many()
                    .filter(art_comment::Column::ArtId.eq(id))
                    .exec(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
            ContentKind::Video => {
                VideoComment::delete_many()
                    .filter(video_comment::Column::VideoId.eq(id))
                    .exec(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
        }

        Like::delete_many()
            .filter(like::Column::TargetKind.eq(kind))
            .filter(like::Column::TargetId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match kind {
            ContentKind::Post => Post::delete_by_id(id)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?,
            ContentKind::Art => Art::delete_by_id(id)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?,
            ContentKind::Video => Video::delete_by_id(id)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?,
        };

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
