//! Account service: signup, credential checks, profile edits, deletion.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use newlands_common::{AppError, AppResult, IdGenerator};
use newlands_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(length(min = 5, max = 256))]
    pub email: String,

    #[validate(length(min = 2, max = 64))]
    pub username: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Input for updating a profile.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(min = 2, max = 64))]
    pub username: Option<String>,

    #[validate(length(max = 2048))]
    pub bio: Option<String>,

    /// Stored avatar reference (resolved by the upload layer).
    pub avatar_url: Option<String>,
}

/// Account service for business logic.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new account.
    pub async fn signup(&self, input: SignupInput) -> AppResult<user::Model> {
        input.validate()?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("email already registered".to_string()));
        }
        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("username already taken".to_string()));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            username: Set(input.username),
            password_hash: Set(password_hash),
            bio: Set(String::new()),
            avatar_url: Set(None),
            created_at: Set(Utc::now().into()),
        };

        // The unique columns catch a signup race the pre-checks miss.
        let user = self.user_repo.create(model).await?;
        tracing::debug!(user_id = %user.id, "Created account");
        Ok(user)
    }

    /// Check an email/password pair and return the matching user.
    ///
    /// Session issuance is the caller's concern; this only answers whether
    /// the credentials are good.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::UserNotFound(email.to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Forbidden("password does not match".to_string()));
        }

        Ok(user)
    }

    /// Update a user's profile.
    pub async fn update_profile(
        &self,
        user_id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        input.validate()?;

        let user = self.user_repo.get_by_id(user_id).await?;

        if let Some(ref username) = input.username
            && username != &user.username
            && self.user_repo.find_by_username(username).await?.is_some()
        {
            return Err(AppError::Conflict("username already taken".to_string()));
        }

        let mut active: user::ActiveModel = user.into();
        if let Some(username) = input.username {
            active.username = Set(username);
        }
        if let Some(bio) = input.bio {
            active.bio = Set(bio);
        }
        if let Some(avatar_url) = input.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }

        self.user_repo.update(active).await
    }

    /// Delete an account and everything it owns.
    ///
    /// One transaction removes the user row, and with it (via foreign keys)
    /// their content, comments, likes, follow edges in both directions, and
    /// notifications either side of; likes other users put on the deleted
    /// user's content are purged explicitly across the discriminator
    /// boundary.
    pub async fn delete_account(&self, user_id: &str) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;
        self.user_repo.delete_cascade(&user.id).await?;
        tracing::debug!(user_id = %user.id, "Deleted account");
        Ok(())
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: format!("{username}@example.com"),
            username: username.to_string(),
            password_hash: hash_password("hunter2!").unwrap(),
            bio: String::new(),
            avatar_url: None,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> AccountService {
        AccountService::new(UserRepository::new(db))
    }

    // Unit tests for password functions
    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(verify_password("test_password_123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_wrong() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(!verify_password("something_else", &hash).unwrap());
    }

    // Service tests
    #[tokio::test]
    async fn test_signup_short_username_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service(db);

        let result = service
            .signup(SignupInput {
                email: "a@example.com".to_string(),
                username: "a".to_string(),
                password: "hunter2!".to_string(),
            })
            .await;
        match result {
            Err(AppError::Validation(_)) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_signup_short_password_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service(db);

        let result = service
            .signup(SignupInput {
                email: "a@example.com".to_string(),
                username: "alice".to_string(),
                password: "abc".to_string(),
            })
            .await;
        match result {
            Err(AppError::Validation(_)) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_rejected() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("user1", "alice")]])
                .into_connection(),
        );
        let service = service(db);

        let result = service
            .signup(SignupInput {
                email: "alice@example.com".to_string(),
                username: "alice2".to_string(),
                password: "hunter2!".to_string(),
            })
            .await;
        match result {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("email")),
            other => panic!("Expected Conflict error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_email() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = service(db);

        let result = service
            .verify_credentials("ghost@example.com", "whatever1")
            .await;
        match result {
            Err(AppError::UserNotFound(_)) => {}
            other => panic!("Expected UserNotFound error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("user1", "alice")]])
                .into_connection(),
        );
        let service = service(db);

        let result = service
            .verify_credentials("alice@example.com", "not-the-password")
            .await;
        match result {
            Err(AppError::Forbidden(_)) => {}
            other => panic!("Expected Forbidden error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_profile_taken_username_rejected() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    vec![test_user("user1", "alice")],
                    vec![test_user("user2", "bob")],
                ])
                .into_connection(),
        );
        let service = service(db);

        let result = service
            .update_profile(
                "user1",
                UpdateProfileInput {
                    username: Some("bob".to_string()),
                    ..Default::default()
                },
            )
            .await;
        match result {
            Err(AppError::Conflict(_)) => {}
            other => panic!("Expected Conflict error, got {other:?}"),
        }
    }
}
