//! Create law section table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LawSection::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LawSection::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LawSection::LawDraftId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LawSection::SectionNo)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LawSection::Content).text().not_null())
                    .col(
                        ColumnDef::new(LawSection::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_law_section_draft")
                            .from(LawSection::Table, LawSection::LawDraftId)
                            .to(LawDraft::Table, LawDraft::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: law_draft_id (listing a draft's sections)
        manager
            .create_index(
                Index::create()
                    .name("idx_law_section_draft_id")
                    .table(LawSection::Table)
                    .col(LawSection::LawDraftId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LawSection::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LawSection {
    Table,
    Id,
    LawDraftId,
    SectionNo,
    Content,
    CreatedAt,
}

#[derive(Iden)]
enum LawDraft {
    Table,
    Id,
}
