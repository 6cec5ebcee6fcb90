//! Notification service.

use chrono::Utc;
use newlands_common::{AppError, AppResult, IdGenerator};
use newlands_db::{
    entities::notification::{self, NotificationType},
    entities::ContentKind,
    repositories::NotificationRepository,
};
use sea_orm::Set;

/// Notification service for business logic.
///
/// Notifications are records of events, not a delivery queue: the record
/// exists once the triggering operation's transaction commits, and nothing
/// here retries or pushes.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    id_gen: IdGenerator,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(notification_repo: NotificationRepository) -> Self {
        Self {
            notification_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Build an unread notification row.
    ///
    /// The follow/like/comment services insert the row inside the same
    /// transaction as the action that triggered it; this only assigns the
    /// ID and timestamp.
    #[must_use]
    pub fn compose(
        &self,
        notifiee_id: &str,
        notifier_id: &str,
        notification_type: NotificationType,
        target: Option<(&str, ContentKind)>,
    ) -> notification::ActiveModel {
        notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            notifiee_id: Set(notifiee_id.to_string()),
            notifier_id: Set(notifier_id.to_string()),
            notification_type: Set(notification_type),
            target_id: Set(target.map(|(id, _)| id.to_string())),
            target_kind: Set(target.map(|(_, kind)| kind)),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
        }
    }

    /// Create a notification record on its own.
    pub async fn notify(
        &self,
        notifiee_id: &str,
        notifier_id: &str,
        notification_type: NotificationType,
        target: Option<(&str, ContentKind)>,
    ) -> AppResult<notification::Model> {
        let model = self.compose(notifiee_id, notifier_id, notification_type, target);
        self.notification_repo.create(model).await
    }

    /// A user's inbox, newest first.
    pub async fn inbox(&self, user_id: &str) -> AppResult<Vec<notification::Model>> {
        self.notification_repo.find_by_user(user_id).await
    }

    /// Mark a notification as read. Only the recipient may do this.
    pub async fn mark_read(&self, id: &str, requester_id: &str) -> AppResult<()> {
        let notification = self
            .notification_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        if notification.notifiee_id != requester_id {
            return Err(AppError::Forbidden(
                "only the recipient can mark a notification read".to_string(),
            ));
        }

        self.notification_repo.mark_as_read(id).await
    }

    /// Number of unread notifications for a user.
    pub async fn unread_count(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.count_unread(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_notification(id: &str, notifiee: &str, notifier: &str) -> notification::Model {
        notification::Model {
            id: id.to_string(),
            notifiee_id: notifiee.to_string(),
            notifier_id: notifier.to_string(),
            notification_type: NotificationType::Follow,
            target_id: None,
            target_kind: None,
            is_read: false,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_compose_sets_target_fields_together() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = NotificationService::new(NotificationRepository::new(db));

        let model = service.compose(
            "user1",
            "user2",
            NotificationType::Like,
            Some(("post1", ContentKind::Post)),
        );

        assert_eq!(model.target_id, Set(Some("post1".to_string())));
        assert_eq!(model.target_kind, Set(Some(ContentKind::Post)));
        assert_eq!(model.is_read, Set(false));
    }

    #[test]
    fn test_compose_without_target() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = NotificationService::new(NotificationRepository::new(db));

        let model = service.compose("user1", "user2", NotificationType::Follow, None);

        assert_eq!(model.target_id, Set(None));
        assert_eq!(model.target_kind, Set(None));
    }

    #[tokio::test]
    async fn test_mark_read_requires_recipient() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_notification("n1", "user1", "user2")]])
                .into_connection(),
        );
        let service = NotificationService::new(NotificationRepository::new(db));

        let result = service.mark_read("n1", "user2").await;
        match result {
            Err(AppError::Forbidden(_)) => {}
            other => panic!("Expected Forbidden error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mark_read_missing_notification() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<notification::Model>::new()])
                .into_connection(),
        );
        let service = NotificationService::new(NotificationRepository::new(db));

        let result = service.mark_read("nope", "user1").await;
        match result {
            Err(AppError::NotFound(id)) => assert_eq!(id, "nope"),
            other => panic!("Expected NotFound error, got {other:?}"),
        }
    }
}
