//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `newlands_test`)
//!   `TEST_DB_PASSWORD` (default: `newlands_test`)
//!   `TEST_DB_NAME` (default: `newlands_test`)

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use newlands_common::{AppError, IdGenerator};
use newlands_db::entities::{follow, like, notification, post, user, ContentKind};
use newlands_db::entities::notification::NotificationType;
use newlands_db::repositories::{
    ContentRepository, FollowRepository, LikeRepository, PostRepository, UserRepository,
};
use newlands_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::Set;

fn user_model(id_gen: &IdGenerator, username: &str) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(id_gen.generate()),
        email: Set(format!("{username}@example.com")),
        username: Set(username.to_string()),
        password_hash: Set("$argon2id$test".to_string()),
        bio: Set(String::new()),
        avatar_url: Set(None),
        created_at: Set(Utc::now().into()),
    }
}

fn like_model(id_gen: &IdGenerator, user_id: &str, target_id: &str) -> like::ActiveModel {
    like::ActiveModel {
        id: Set(id_gen.generate()),
        user_id: Set(user_id.to_string()),
        target_id: Set(target_id.to_string()),
        target_kind: Set(ContentKind::Post),
        created_at: Set(Utc::now().into()),
    }
}

#[test]
fn test_config_from_env() {
    // Test that default config is valid
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testuser"));
    assert!(url.contains("testdb"));
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_like_triple_is_unique() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.conn.clone();
    let id_gen = IdGenerator::new();

    let users = UserRepository::new(conn.clone());
    let posts = PostRepository::new(conn.clone());
    let likes = LikeRepository::new(conn.clone());

    let alice = users.create(user_model(&id_gen, "alice")).await.unwrap();
    let bob = users.create(user_model(&id_gen, "bob")).await.unwrap();
    let post = posts
        .create(post::ActiveModel {
            id: Set(id_gen.generate()),
            user_id: Set(alice.id.clone()),
            text: Set("hello".to_string()),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    likes
        .insert_with_notification(like_model(&id_gen, &bob.id, &post.id), None)
        .await
        .unwrap();

    // Second insert for the same triple hits the unique index
    let result = likes
        .insert_with_notification(like_model(&id_gen, &bob.id, &post.id), None)
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(
        likes.count_for_target(&post.id, ContentKind::Post).await.unwrap(),
        1
    );

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_follow_pair_is_unique() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.conn.clone();
    let id_gen = IdGenerator::new();

    let users = UserRepository::new(conn.clone());
    let follows = FollowRepository::new(conn.clone());

    let alice = users.create(user_model(&id_gen, "alice")).await.unwrap();
    let bob = users.create(user_model(&id_gen, "bob")).await.unwrap();

    let edge = |id_gen: &IdGenerator| follow::ActiveModel {
        id: Set(id_gen.generate()),
        follower_id: Set(alice.id.clone()),
        followee_id: Set(bob.id.clone()),
        created_at: Set(Utc::now().into()),
    };
    let note = |id_gen: &IdGenerator| notification::ActiveModel {
        id: Set(id_gen.generate()),
        notifiee_id: Set(bob.id.clone()),
        notifier_id: Set(alice.id.clone()),
        notification_type: Set(NotificationType::Follow),
        target_id: Set(None),
        target_kind: Set(None),
        is_read: Set(false),
        created_at: Set(Utc::now().into()),
    };

    follows
        .create_with_notification(edge(&id_gen), note(&id_gen))
        .await
        .unwrap();
    let result = follows
        .create_with_notification(edge(&id_gen), note(&id_gen))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    // The losing transaction rolled back whole: one edge, one notification
    assert_eq!(follows.find_followers(&bob.id).await.unwrap().len(), 1);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_content_delete_cascade_purges_discriminator_rows() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.conn.clone();
    let id_gen = IdGenerator::new();

    let users = UserRepository::new(conn.clone());
    let posts = PostRepository::new(conn.clone());
    let likes = LikeRepository::new(conn.clone());
    let content = ContentRepository::new(conn.clone());

    let alice = users.create(user_model(&id_gen, "alice")).await.unwrap();
    let bob = users.create(user_model(&id_gen, "bob")).await.unwrap();
    let post = posts
        .create(post::ActiveModel {
            id: Set(id_gen.generate()),
            user_id: Set(alice.id.clone()),
            text: Set("hello".to_string()),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    likes
        .insert_with_notification(like_model(&id_gen, &bob.id, &post.id), None)
        .await
        .unwrap();

    content.delete_cascade(ContentKind::Post, &post.id).await.unwrap();

    assert!(content
        .find_item(ContentKind::Post, &post.id)
        .await
        .unwrap()
        .is_none());
    // No orphaned ledger rows survive the kind boundary
    assert_eq!(
        likes.count_for_target(&post.id, ContentKind::Post).await.unwrap(),
        0
    );

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_user_delete_cascade_purges_likes_on_their_content() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.conn.clone();
    let id_gen = IdGenerator::new();

    let users = UserRepository::new(conn.clone());
    let posts = PostRepository::new(conn.clone());
    let likes = LikeRepository::new(conn.clone());

    let alice = users.create(user_model(&id_gen, "alice")).await.unwrap();
    let bob = users.create(user_model(&id_gen, "bob")).await.unwrap();
    let post = posts
        .create(post::ActiveModel {
            id: Set(id_gen.generate()),
            user_id: Set(alice.id.clone()),
            text: Set("hello".to_string()),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    // Bob's like survives Bob-side cascades; only the explicit purge in
    // delete_cascade can reach it once Alice (and her post) go away.
    likes
        .insert_with_notification(like_model(&id_gen, &bob.id, &post.id), None)
        .await
        .unwrap();

    users.delete_cascade(&alice.id).await.unwrap();

    assert!(users.find_by_id(&alice.id).await.unwrap().is_none());
    assert_eq!(
        likes.count_for_target(&post.id, ContentKind::Post).await.unwrap(),
        0
    );

    db.drop_database().await.unwrap();
}
