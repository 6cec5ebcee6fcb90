//! Create art table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Art::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Art::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Art::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Art::MediaUrl).string_len(512).not_null())
                    .col(
                        ColumnDef::new(Art::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_art_user")
                            .from(Art::Table, Art::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for per-author galleries)
        manager
            .create_index(
                Index::create()
                    .name("idx_art_user_id")
                    .table(Art::Table)
                    .col(Art::UserId)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for newest-first galleries)
        manager
            .create_index(
                Index::create()
                    .name("idx_art_created_at")
                    .table(Art::Table)
                    .col(Art::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Art::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Art {
    Table,
    Id,
    UserId,
    MediaUrl,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
