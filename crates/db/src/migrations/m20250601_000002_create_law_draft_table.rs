//! Create law draft table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LawDraft::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LawDraft::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LawDraft::Title).string_len(512).not_null())
                    .col(ColumnDef::new(LawDraft::Description).text().not_null())
                    .col(ColumnDef::new(LawDraft::Category).string_len(100).not_null())
                    .col(ColumnDef::new(LawDraft::Agency).string_len(256).not_null())
                    .col(
                        ColumnDef::new(LawDraft::Status)
                            .string_len(16)
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(
                        ColumnDef::new(LawDraft::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LawDraft::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LawDraft::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(LawDraft::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: status (front-page listing filters open drafts)
        manager
            .create_index(
                Index::create()
                    .name("idx_law_draft_status")
                    .table(LawDraft::Table)
                    .col(LawDraft::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LawDraft::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LawDraft {
    Table,
    Id,
    Title,
    Description,
    Category,
    Agency,
    Status,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}
