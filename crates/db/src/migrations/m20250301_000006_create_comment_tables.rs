//! Create comment tables migration.
//!
//! One comment table per content kind; each carries a real foreign key to
//! its parent, so parent deletion cascades at the storage layer.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // post_comment
        manager
            .create_table(
                Table::create()
                    .table(PostComment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostComment::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PostComment::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PostComment::PostId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PostComment::Text).text().not_null())
                    .col(
                        ColumnDef::new(PostComment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_comment_user")
                            .from(PostComment::Table, PostComment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_comment_post")
                            .from(PostComment::Table, PostComment::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: post_id (for thread listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_post_comment_post_id")
                    .table(PostComment::Table)
                    .col(PostComment::PostId)
                    .to_owned(),
            )
            .await?;

        // art_comment
        manager
            .create_table(
                Table::create()
                    .table(ArtComment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArtComment::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ArtComment::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ArtComment::ArtId).string_len(32).not_null())
                    .col(ColumnDef::new(ArtComment::Text).text().not_null())
                    .col(
                        ColumnDef::new(ArtComment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_art_comment_user")
                            .from(ArtComment::Table, ArtComment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_art_comment_art")
                            .from(ArtComment::Table, ArtComment::ArtId)
                            .to(Art::Table, Art::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: art_id (for thread listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_art_comment_art_id")
                    .table(ArtComment::Table)
                    .col(ArtComment::ArtId)
                    .to_owned(),
            )
            .await?;

        // video_comment
        manager
            .create_table(
                Table::create()
                    .table(VideoComment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoComment::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VideoComment::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VideoComment::VideoId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(VideoComment::Text).text().not_null())
                    .col(
                        ColumnDef::new(VideoComment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_comment_user")
                            .from(VideoComment::Table, VideoComment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_comment_video")
                            .from(VideoComment::Table, VideoComment::VideoId)
                            .to(Video::Table, Video::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: video_id (for thread listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_video_comment_video_id")
                    .table(VideoComment::Table)
                    .col(VideoComment::VideoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoComment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ArtComment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostComment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PostComment {
    Table,
    Id,
    UserId,
    PostId,
    Text,
    CreatedAt,
}

#[derive(Iden)]
enum ArtComment {
    Table,
    Id,
    UserId,
    ArtId,
    Text,
    CreatedAt,
}

#[derive(Iden)]
enum VideoComment {
    Table,
    Id,
    UserId,
    VideoId,
    Text,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
}

#[derive(Iden)]
enum Art {
    Table,
    Id,
}

#[derive(Iden)]
enum Video {
    Table,
    Id,
}
