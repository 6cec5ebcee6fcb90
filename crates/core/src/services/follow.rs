//! Follow service.

use std::collections::HashMap;

use chrono::Utc;
use newlands_common::{AppError, AppResult, IdGenerator};
use newlands_db::{
    entities::{follow, notification::NotificationType, user},
    repositories::{FollowRepository, UserRepository},
};
use sea_orm::Set;

use crate::services::notification::NotificationService;

/// Follow service for business logic.
#[derive(Clone)]
pub struct FollowService {
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl FollowService {
    /// Create a new follow service.
    #[must_use]
    pub const fn new(
        follow_repo: FollowRepository,
        user_repo: UserRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            follow_repo,
            user_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Follow a user.
    ///
    /// Idempotent: following someone you already follow is a no-op, as is
    /// losing the insert race to a concurrent request. Self-follows are
    /// rejected. A genuinely new edge notifies the followee in the same
    /// transaction.
    pub async fn follow(&self, follower_id: &str, followee_id: &str) -> AppResult<()> {
        if follower_id == followee_id {
            return Err(AppError::Validation("cannot follow yourself".to_string()));
        }

        let follower = self.user_repo.get_by_id(follower_id).await?;
        let followee = self.user_repo.get_by_id(followee_id).await?;

        if self
            .follow_repo
            .is_following(follower_id, followee_id)
            .await?
        {
            return Ok(());
        }

        let edge = follow::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(follower.id.clone()),
            followee_id: Set(followee.id.clone()),
            created_at: Set(Utc::now().into()),
        };
        let notification =
            self.notifications
                .compose(&followee.id, &follower.id, NotificationType::Follow, None);

        match self
            .follow_repo
            .create_with_notification(edge, notification)
            .await
        {
            Ok(_) => {
                tracing::debug!(follower_id = %follower.id, followee_id = %followee.id, "Created follow edge");
                Ok(())
            }
            // A concurrent follow won the race; the edge exists, which is
            // all the caller asked for.
            Err(AppError::Conflict(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Unfollow a user. A no-op when not following; does not retract the
    /// original follow notification.
    pub async fn unfollow(&self, follower_id: &str, followee_id: &str) -> AppResult<()> {
        self.follow_repo
            .delete_by_pair(follower_id, followee_id)
            .await
    }

    /// Check whether one user follows another.
    pub async fn is_following(&self, follower_id: &str, followee_id: &str) -> AppResult<bool> {
        self.follow_repo
            .is_following(follower_id, followee_id)
            .await
    }

    /// The users following `user_id`, most recent follow first.
    pub async fn followers(&self, user_id: &str) -> AppResult<Vec<user::Model>> {
        let edges = self.follow_repo.find_followers(user_id).await?;
        let ids: Vec<String> = edges.into_iter().map(|e| e.follower_id).collect();
        self.users_in_order(ids).await
    }

    /// The users `user_id` follows, most recent follow first.
    pub async fn following(&self, user_id: &str) -> AppResult<Vec<user::Model>> {
        let edges = self.follow_repo.find_following(user_id).await?;
        let ids: Vec<String> = edges.into_iter().map(|e| e.followee_id).collect();
        self.users_in_order(ids).await
    }

    /// Fetch users by ID, preserving the given ID order.
    async fn users_in_order(&self, ids: Vec<String>) -> AppResult<Vec<user::Model>> {
        let mut users = self.user_repo.find_by_ids(&ids).await?;
        let position: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        users.sort_by_key(|u| position.get(u.id.as_str()).copied().unwrap_or(usize::MAX));
        Ok(users)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
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

    fn test_edge(id: &str, follower: &str, followee: &str) -> follow::Model {
        follow::Model {
            id: id.to_string(),
            follower_id: follower.to_string(),
            followee_id: followee.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service_with(
        follow_db: Arc<sea_orm::DatabaseConnection>,
        user_db: Arc<sea_orm::DatabaseConnection>,
    ) -> FollowService {
        let notification_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        FollowService::new(
            FollowRepository::new(follow_db),
            UserRepository::new(user_db),
            NotificationService::new(NotificationRepository::new(notification_db)),
        )
    }

    #[tokio::test]
    async fn test_follow_self_is_rejected() {
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service_with(follow_db, user_db);

        let result = service.follow("user1", "user1").await;
        match result {
            Err(AppError::Validation(_)) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_follow_unknown_followee() {
        let follow_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![test_user("user1", "alice")], vec![]])
                .into_connection(),
        );

        let service = service_with(follow_db, user_db);

        let result = service.follow("user1", "ghost").await;
        match result {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "ghost"),
            other => panic!("Expected UserNotFound error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_follow_twice_is_a_noop() {
        // The pair lookup finds an existing edge, so no insert is attempted
        // (the follow mock has no insert results to consume).
        let follow_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_edge("f1", "user1", "user2")]])
                .into_connection(),
        );
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    vec![test_user("user1", "alice")],
                    vec![test_user("user2", "bob")],
                ])
                .into_connection(),
        );

        let service = service_with(follow_db, user_db);

        service.follow("user1", "user2").await.unwrap();
    }

    #[tokio::test]
    async fn test_unfollow_without_edge_is_a_noop() {
        let follow_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<follow::Model>::new()])
                .into_connection(),
        );
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service_with(follow_db, user_db);

        service.unfollow("user1", "user2").await.unwrap();
    }

    #[tokio::test]
    async fn test_followers_preserve_edge_order() {
        let follow_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    test_edge("f2", "user3", "user1"),
                    test_edge("f1", "user2", "user1"),
                ]])
                .into_connection(),
        );
        // The ID lookup returns users in storage order; the service restores
        // edge order (newest follow first).
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("user2", "bob"), test_user("user3", "carol")]])
                .into_connection(),
        );

        let service = service_with(follow_db, user_db);

        let followers = service.followers("user1").await.unwrap();
        let ids: Vec<&str> = followers.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["user3", "user2"]);
    }
}
