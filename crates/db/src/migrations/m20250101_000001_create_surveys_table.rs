//! Create surveys (poll) table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Surveys::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Surveys::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Surveys::Title).text().not_null())
                    .col(ColumnDef::new(Surveys::ExpireAt).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Surveys::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: title (for lookups by title)
        manager
            .create_index(
                Index::create()
                    .name("idx_surveys_title")
                    .table(Surveys::Table)
                    .col(Surveys::Title)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Surveys::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Surveys {
    Table,
    Id,
    Title,
    ExpireAt,
    CreatedAt,
}
