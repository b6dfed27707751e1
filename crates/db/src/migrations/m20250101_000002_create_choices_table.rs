//! Create choices table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Choices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Choices::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Choices::PollId).string_len(32).not_null())
                    .col(ColumnDef::new(Choices::Title).text().not_null())
                    .col(
                        ColumnDef::new(Choices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_choices_poll")
                            .from(Choices::Table, Choices::PollId)
                            .to(Surveys::Table, Surveys::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (poll_id, title) - one choice title per poll
        manager
            .create_index(
                Index::create()
                    .name("idx_choices_poll_title")
                    .table(Choices::Table)
                    .col(Choices::PollId)
                    .col(Choices::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (poll_id, created_at) - listing a poll's choices in order
        manager
            .create_index(
                Index::create()
                    .name("idx_choices_poll_created_at")
                    .table(Choices::Table)
                    .col(Choices::PollId)
                    .col(Choices::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Choices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Choices {
    Table,
    Id,
    PollId,
    Title,
    CreatedAt,
}

#[derive(Iden)]
enum Surveys {
    Table,
    Id,
}
