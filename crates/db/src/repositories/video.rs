//! Video repository.

use std::sync::Arc;

use crate::entities::{video, Video};
use newlands_common::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Video repository for database operations.
#[derive(Clone)]
pub struct VideoRepository {
    db: Arc<DatabaseConnection>,
}

impl VideoRepository {
    /// Create a new video repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new video.
    pub async fn create(&self, model: video::ActiveModel) -> AppResult<video::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's videos, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<video::Model>> {
        Video::find()
            .filter(video::Column::UserId.eq(user_id))
            .order_by_desc(video::Column::CreatedAt)
            .order_by_desc(video::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all videos, newest first.
    pub async fn find_recent(&self) -> AppResult<Vec<video::Model>> {
        Video::find()
            .order_by_desc(video::Column::CreatedAt)
            .order_by_desc(video::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment a video's view counter and return the new count.
    pub async fn increment_views(&self, id: &str) -> AppResult<i64> {
        let result = Video::update_many()
            .col_expr(
                video::Column::ViewCount,
                Expr::col(video::Column::ViewCount).add(1),
            )
            .filter(video::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::ContentNotFound(id.to_string()));
        }

        let video = Video::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::ContentNotFound(id.to_string()))?;

        Ok(video.view_count)
    }
}
