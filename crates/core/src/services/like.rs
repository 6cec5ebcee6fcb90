//! Like service - toggling entries in the engagement ledger.

use chrono::Utc;
use newlands_common::{AppError, AppResult, IdGenerator};
use newlands_db::{
    entities::{like, notification::NotificationType, ContentKind},
    repositories::{ContentRepository, LikeRepository},
};
use sea_orm::Set;
use serde::Serialize;

use crate::services::notification::NotificationService;

/// Result state of a like toggle.
///
/// A (user, target) pair starts `Unliked`; `toggle` is the only transition
/// in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    Liked,
    Unliked,
}

/// Like service for business logic.
#[derive(Clone)]
pub struct LikeService {
    like_repo: LikeRepository,
    content_repo: ContentRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub const fn new(
        like_repo: LikeRepository,
        content_repo: ContentRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            like_repo,
            content_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle a user's like on a content item.
    ///
    /// The target must exist for its kind; the discriminator reference
    /// gives the schema no way to check. A fresh like notifies the owner in
    /// the same transaction (not when liking your own item). Losing the
    /// insert race to a concurrent toggle lands on `Liked` with no
    /// duplicate row and no duplicate notification.
    pub async fn toggle(
        &self,
        user_id: &str,
        target_id: &str,
        target_kind: ContentKind,
    ) -> AppResult<LikeState> {
        let item = self.content_repo.get_item(target_kind, target_id).await?;

        if let Some(existing) = self.like_repo.find(user_id, target_id, target_kind).await? {
            self.like_repo.delete(existing).await?;
            tracing::debug!(user_id = %user_id, target_id = %target_id, kind = %target_kind, "Removed like");
            return Ok(LikeState::Unliked);
        }

        let notification = (item.owner_id() != user_id).then(|| {
            self.notifications.compose(
                item.owner_id(),
                user_id,
                NotificationType::Like,
                Some((target_id, target_kind)),
            )
        });

        let model = like::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            target_id: Set(target_id.to_string()),
            target_kind: Set(target_kind),
            created_at: Set(Utc::now().into()),
        };

        match self
            .like_repo
            .insert_with_notification(model, notification)
            .await
        {
            Ok(_) => {
                tracing::debug!(user_id = %user_id, target_id = %target_id, kind = %target_kind, "Created like");
                Ok(LikeState::Liked)
            }
            // A concurrent toggle inserted the row first; the item is liked
            // either way, and that insert already carried the notification.
            Err(AppError::Conflict(_)) => {
                tracing::debug!(user_id = %user_id, target_id = %target_id, "Like insert lost a toggle race");
                Ok(LikeState::Liked)
            }
            Err(e) => Err(e),
        }
    }

    /// Number of likes on a content item, always counted from the ledger.
    pub async fn count(&self, target_id: &str, target_kind: ContentKind) -> AppResult<u64> {
        self.like_repo.count_for_target(target_id, target_kind).await
    }

    /// Whether a user has liked a content item.
    pub async fn is_liked_by(
        &self,
        user_id: &str,
        target_id: &str,
        target_kind: ContentKind,
    ) -> AppResult<bool> {
        self.like_repo.is_liked(user_id, target_id, target_kind).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use newlands_db::entities::post;
    use newlands_db::repositories::NotificationRepository;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_post(id: &str, user_id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            text: "Hello".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn test_like(id: &str, user_id: &str, target_id: &str) -> like::Model {
        like::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            target_id: target_id.to_string(),
            target_kind: ContentKind::Post,
            created_at: Utc::now().into(),
        }
    }

    fn empty_conn() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn service_with(
        like_db: Arc<sea_orm::DatabaseConnection>,
        content_db: Arc<sea_orm::DatabaseConnection>,
    ) -> LikeService {
        LikeService::new(
            LikeRepository::new(like_db),
            ContentRepository::new(content_db),
            NotificationService::new(NotificationRepository::new(empty_conn())),
        )
    }

    #[tokio::test]
    async fn test_toggle_missing_target_returns_error() {
        let content_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );
        let service = service_with(empty_conn(), content_db);

        let result = service.toggle("user2", "nope", ContentKind::Post).await;
        match result {
            Err(AppError::ContentNotFound(id)) => assert_eq!(id, "nope"),
            other => panic!("Expected ContentNotFound error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_toggle_existing_like_removes_it() {
        let content_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("post1", "user1")]])
                .into_connection(),
        );
        // One query result (the existing like) and one exec (its delete).
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_like("l1", "user2", "post1")]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = service_with(like_db, content_db);

        let state = service
            .toggle("user2", "post1", ContentKind::Post)
            .await
            .unwrap();
        assert_eq!(state, LikeState::Unliked);
    }

    #[tokio::test]
    async fn test_count_is_read_from_the_ledger() {
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(1))
                }]])
                .into_connection(),
        );
        let service = service_with(like_db, empty_conn());

        let count = service.count("post1", ContentKind::Post).await.unwrap();
        assert_eq!(count, 1);
    }
}
