//! Art repository.

use std::sync::Arc;

use crate::entities::{art, Art};
use newlands_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Art repository for database operations.
#[derive(Clone)]
pub struct ArtRepository {
    db: Arc<DatabaseConnection>,
}

impl ArtRepository {
    /// Create a new art repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new art piece.
    pub async fn create(&self, model: art::ActiveModel) -> AppResult<art::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's art, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<art::Model>> {
        Art::find()
            .filter(art::Column::UserId.eq(user_id))
            .order_by_desc(art::Column::CreatedAt)
            .order_by_desc(art::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all art, newest first.
    pub async fn find_recent(&self) -> AppResult<Vec<art::Model>> {
        Art::find()
            .order_by_desc(art::Column::CreatedAt)
            .order_by_desc(art::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
