//! Like repository - the engagement ledger.

use std::sync::Arc;

use crate::entities::{like, notification, ContentKind, Like};
use newlands_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, SqlErr, TransactionTrait,
};

/// Like repository for database operations.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
}

impl LikeRepository {
    /// Create a new like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user's like on a target, if any.
    pub async fn find(
        &self,
        user_id: &str,
        target_id: &str,
        target_kind: ContentKind,
    ) -> AppResult<Option<like::Model>> {
        Like::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::TargetId.eq(target_id))
            .filter(like::Column::TargetKind.eq(target_kind))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a user has liked a target.
    pub async fn is_liked(
        &self,
        user_id: &str,
        target_id: &str,
        target_kind: ContentKind,
    ) -> AppResult<bool> {
        Ok(self.find(user_id, target_id, target_kind).await?.is_some())
    }

    /// Count the ledger rows for a target.
    ///
    /// Always derived from the ledger; there is no counter to drift.
    pub async fn count_for_target(
        &self,
        target_id: &str,
        target_kind: ContentKind,
    ) -> AppResult<u64> {
        Like::find()
            .filter(like::Column::TargetId.eq(target_id))
            .filter(like::Column::TargetKind.eq(target_kind))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a like and (optionally) its notification in one transaction.
    ///
    /// A violation of the (user, target, kind) unique index maps to
    /// [`AppError::Conflict`] so the caller can treat a concurrent toggle
    /// as "already liked" instead of a failure.
    pub async fn insert_with_notification(
        &self,
        like: like::ActiveModel,
        notification: Option<notification::ActiveModel>,
    ) -> AppResult<like::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let like = like.insert(&txn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("like already exists".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        if let Some(n) = notification {
            n.insert(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(like)
    }

    /// Delete a like.
    pub async fn delete(&self, like: like::Model) -> AppResult<()> {
        like.delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
