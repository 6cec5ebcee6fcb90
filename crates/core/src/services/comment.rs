//! Comment service for per-kind comment threads.

use chrono::Utc;
use newlands_common::{AppError, AppResult, IdGenerator};
use newlands_db::{
    entities::{notification::NotificationType, ContentKind},
    repositories::{CommentRepository, CommentView, ContentRepository, NewComment, UserRepository},
};

use crate::services::notification::NotificationService;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    content_repo: ContentRepository,
    user_repo: UserRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(
        comment_repo: CommentRepository,
        content_repo: ContentRepository,
        user_repo: UserRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            comment_repo,
            content_repo,
            user_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Comment on a content item.
    ///
    /// The content owner is notified in the same transaction, unless they
    /// commented on their own item.
    pub async fn add(
        &self,
        kind: ContentKind,
        author_id: &str,
        content_id: &str,
        text: &str,
    ) -> AppResult<CommentView> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "comment text cannot be empty".to_string(),
            ));
        }

        let author = self.user_repo.get_by_id(author_id).await?;
        let item = self.content_repo.get_item(kind, content_id).await?;

        let notification = (item.owner_id() != author.id).then(|| {
            self.notifications.compose(
                item.owner_id(),
                &author.id,
                NotificationType::Comment,
                Some((content_id, kind)),
            )
        });

        let comment = NewComment {
            id: self.id_gen.generate(),
            author_id: author.id,
            content_id: content_id.to_string(),
            text: text.to_string(),
            created_at: Utc::now().into(),
        };

        self.comment_repo
            .create_with_notification(kind, comment, notification)
            .await
    }

    /// Delete a comment. Permitted for the comment author or the owner of
    /// the content it sits on.
    pub async fn delete(
        &self,
        kind: ContentKind,
        comment_id: &str,
        requester_id: &str,
    ) -> AppResult<()> {
        let comment = self.comment_repo.get(kind, comment_id).await?;
        let item = self.content_repo.get_item(kind, &comment.content_id).await?;

        if requester_id != comment.author_id && requester_id != item.owner_id() {
            return Err(AppError::Forbidden(
                "only the comment author or the content owner can delete a comment".to_string(),
            ));
        }

        self.comment_repo.delete(kind, comment_id).await
    }

    /// The comments on a content item in thread order (oldest first).
    pub async fn list_for_content(
        &self,
        kind: ContentKind,
        content_id: &str,
    ) -> AppResult<Vec<CommentView>> {
        // Resolve the parent first so a missing item reads as not-found
        // rather than an empty thread.
        self.content_repo.get_item(kind, content_id).await?;
        self.comment_repo.list_for_content(kind, content_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use newlands_db::entities::{post, post_comment, user};
    use newlands_db::repositories::NotificationRepository;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: format!("{username}@example.com"),
            username: username.to_string(),
            password_hash: "$argon2id$test".to_string(),
            bio: String::new(),
            avatar_url: None,
            created_at: Utc::now().into(),
        }
    }

    fn test_post(id: &str, user_id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            text: "Hello".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn test_comment(id: &str, user_id: &str, post_id: &str) -> post_comment::Model {
        post_comment::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            text: "Nice".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn empty_conn() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn service_with(
        comment_db: Arc<sea_orm::DatabaseConnection>,
        content_db: Arc<sea_orm::DatabaseConnection>,
        user_db: Arc<sea_orm::DatabaseConnection>,
    ) -> CommentService {
        CommentService::new(
            CommentRepository::new(comment_db),
            ContentRepository::new(content_db),
            UserRepository::new(user_db),
            NotificationService::new(NotificationRepository::new(empty_conn())),
        )
    }

    #[tokio::test]
    async fn test_add_blank_text_returns_error() {
        let service = service_with(empty_conn(), empty_conn(), empty_conn());

        let result = service.add(ContentKind::Post, "user1", "post1", " \n ").await;
        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_missing_parent_returns_error() {
        let content_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("user1", "alice")]])
                .into_connection(),
        );
        let service = service_with(empty_conn(), content_db, user_db);

        let result = service.add(ContentKind::Post, "user1", "nope", "First!").await;
        match result {
            Err(AppError::ContentNotFound(id)) => assert_eq!(id, "nope"),
            other => panic!("Expected ContentNotFound error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_requires_author_or_owner() {
        // Comment by user2 on user1's post; user3 may not delete it.
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_comment("c1", "user2", "post1")]])
                .into_connection(),
        );
        let content_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("post1", "user1")]])
                .into_connection(),
        );
        let service = service_with(comment_db, content_db, empty_conn());

        let result = service.delete(ContentKind::Post, "c1", "user3").await;
        match result {
            Err(AppError::Forbidden(_)) => {}
            other => panic!("Expected Forbidden error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_missing_comment() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post_comment::Model>::new()])
                .into_connection(),
        );
        let service = service_with(comment_db, empty_conn(), empty_conn());

        let result = service.delete(ContentKind::Post, "nope", "user1").await;
        match result {
            Err(AppError::CommentNotFound(id)) => assert_eq!(id, "nope"),
            other => panic!("Expected CommentNotFound error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_for_missing_content_is_not_found() {
        let content_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );
        let service = service_with(empty_conn(), content_db, empty_conn());

        let result = service.list_for_content(ContentKind::Post, "nope").await;
        match result {
            Err(AppError::ContentNotFound(_)) => {}
            other => panic!("Expected ContentNotFound error, got {other:?}"),
        }
    }
}
