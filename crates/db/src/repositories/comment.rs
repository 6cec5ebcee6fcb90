//! Comment repository spanning the three per-kind comment tables.
//!
//! Storage stays duplicated per kind (real foreign keys, real cascades);
//! this repository only folds the three identical shapes into one view for
//! the service layer.

use std::sync::Arc;

use crate::entities::{
    art_comment, notification, post_comment, video_comment, ArtComment, ContentKind, PostComment,
    VideoComment,
};
use newlands_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

/// A comment from any of the three comment tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// Comment ID.
    pub id: String,
    /// Comment author.
    pub author_id: String,
    /// The content item the comment sits on.
    pub content_id: String,
    /// Which content table `content_id` points into.
    pub kind: ContentKind,
    /// Comment body.
    pub text: String,
    /// When the comment was created.
    pub created_at: sea_orm::prelude::DateTimeWithTimeZone,
}

impl From<post_comment::Model> for CommentView {
    fn from(c: post_comment::Model) -> Self {
        Self {
            id: c.id,
            author_id: c.user_id,
            content_id: c.post_id,
            kind: ContentKind::Post,
            text: c.text,
            created_at: c.created_at,
        }
    }
}

impl From<art_comment::Model> for CommentView {
    fn from(c: art_comment::Model) -> Self {
        Self {
            id: c.id,
            author_id: c.user_id,
            content_id: c.art_id,
            kind: ContentKind::Art,
            text: c.text,
            created_at: c.created_at,
        }
    }
}

impl From<video_comment::Model> for CommentView {
    fn from(c: video_comment::Model) -> Self {
        Self {
            id: c.id,
            author_id: c.user_id,
            content_id: c.video_id,
            kind: ContentKind::Video,
            text: c.text,
            created_at: c.created_at,
        }
    }
}

/// Field set for a new comment, independent of kind.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Pre-assigned comment ID.
    pub id: String,
    /// Comment author.
    pub author_id: String,
    /// The content item being commented on.
    pub content_id: String,
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: sea_orm::prelude::DateTimeWithTimeZone,
}

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a comment and (optionally) its notification in one
    /// transaction.
    pub async fn create_with_notification(
        &self,
        kind: ContentKind,
        comment: NewComment,
        notification: Option<notification::ActiveModel>,
    ) -> AppResult<CommentView> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let view: CommentView = match kind {
            ContentKind::Post => {
                let model = post_comment::ActiveModel {
                    id: Set(comment.id),
                    user_id: Set(comment.author_id),
                    post_id: Set(comment.content_id),
                    text: Set(comment.text),
                    created_at: Set(comment.created_at),
                };
                model
                    .insert(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                    .into()
            }
            ContentKind::Art => {
                let model = art_comment::ActiveModel {
                    id: Set(comment.id),
                    user_id: Set(comment.author_id),
                    art_id: Set(comment.content_id),
                    text: Set(comment.text),
                    created_at: Set(comment.created_at),
                };
                model
                    .insert(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                    .into()
            }
            ContentKind::Video => {
                let model = video_comment::ActiveModel {
                    id: Set(comment.id),
                    user_id: Set(comment.author_id),
                    video_id: Set(comment.content_id),
                    text: Set(comment.text),
                    created_at: Set(comment.created_at),
                };
                model
                    .insert(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                    .into()
            }
        };

        if let Some(n) = notification {
            n.insert(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(view)
    }

    /// Find a comment by kind and ID.
    pub async fn find(&self, kind: ContentKind, id: &str) -> AppResult<Option<CommentView>> {
        let view = match kind {
            ContentKind::Post => PostComment::find_by_id(id)
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .map(CommentView::from),
            ContentKind::Art => ArtComment::find_by_id(id)
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .map(CommentView::from),
            ContentKind::Video => VideoComment::find_by_id(id)
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .map(CommentView::from),
        };
        Ok(view)
    }

    /// Find a comment by kind and ID, returning an error if not found.
    pub async fn get(&self, kind: ContentKind, id: &str) -> AppResult<CommentView> {
        self.find(kind, id)
            .await?
            .ok_or_else(|| AppError::CommentNotFound(id.to_string()))
    }

    /// List the comments on a content item in thread order (oldest first).
    pub async fn list_for_content(
        &self,
        kind: ContentKind,
        content_id: &str,
    ) -> AppResult<Vec<CommentView>> {
        let views = match kind {
            ContentKind::Post => PostComment::find()
                .filter(post_comment::Column::PostId.eq(content_id))
                .order_by_asc(post_comment::Column::CreatedAt)
                .order_by_asc(post_comment::Column::Id)
                .all(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .into_iter()
                .map(CommentView::from)
                .collect(),
            ContentKind::Art => ArtComment::find()
                .filter(art_comment::Column::ArtId.eq(content_id))
                .order_by_asc(art_comment::Column::CreatedAt)
                .order_by_asc(art_comment::Column::Id)
                .all(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .into_iter()
                .map(CommentView::from)
                .collect(),
            ContentKind::Video => VideoComment::find()
                .filter(video_comment::Column::VideoId.eq(content_id))
                .order_by_asc(video_comment::Column::CreatedAt)
                .order_by_asc(video_comment::Column::Id)
                .all(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .into_iter()
                .map(CommentView::from)
                .collect(),
        };
        Ok(views)
    }

    /// Delete a comment by kind and ID.
    pub async fn delete(&self, kind: ContentKind, id: &str) -> AppResult<()> {
        match kind {
            ContentKind::Post => {
                if let Some(c) = PostComment::find_by_id(id)
                    .one(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                {
                    c.delete(self.db.as_ref())
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;
                }
            }
            ContentKind::Art => {
                if let Some(c) = ArtComment::find_by_id(id)
                    .one(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                {
                    c.delete(self.db.as_ref())
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;
                }
            }
            ContentKind::Video => {
                if let Some(c) = VideoComment::find_by_id(id)
                    .one(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?
                {
                    c.delete(self.db.as_ref())
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;
                }
            }
        }
        Ok(())
    }
}
