//! User lookup service.

use newlands_common::AppResult;
use newlands_db::{entities::user, repositories::UserRepository};

/// User service for identity lookups.
///
/// Account mutation (signup, profile edits, deletion) lives in
/// [`crate::services::account::AccountService`].
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Get a user by username.
    pub async fn get_by_username(&self, username: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_username(username).await
    }

    /// List all users (member directory).
    pub async fn list(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.list_all().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use newlands_common::AppError;
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

    #[tokio::test]
    async fn test_get_by_username() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("user1", "alice")]])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let user = service.get_by_username("alice").await.unwrap();
        assert_eq!(user.id, "user1");
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let result = service.get("ghost").await;
        match result {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "ghost"),
            other => panic!("Expected UserNotFound error, got {other:?}"),
        }
    }
}
