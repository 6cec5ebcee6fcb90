//! Create like table migration.
//!
//! The like table references its target by (target_id, target_kind)
//! discriminator. No foreign key to the content tables is possible, so the
//! only storage-level integrity here is the uniqueness of the triple; the
//! rest is enforced by the repositories.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Like::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Like::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Like::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Like::TargetId).string_len(32).not_null())
                    .col(ColumnDef::new(Like::TargetKind).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Like::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_like_user")
                            .from(Like::Table, Like::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, target_id, target_kind) - one like per user per item
        manager
            .create_index(
                Index::create()
                    .name("idx_like_user_target")
                    .table(Like::Table)
                    .col(Like::UserId)
                    .col(Like::TargetId)
                    .col(Like::TargetKind)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (target_id, target_kind) - for counts and cascade purges
        manager
            .create_index(
                Index::create()
                    .name("idx_like_target")
                    .table(Like::Table)
                    .col(Like::TargetId)
                    .col(Like::TargetKind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Like::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Like {
    Table,
    Id,
    UserId,
    TargetId,
    TargetKind,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
