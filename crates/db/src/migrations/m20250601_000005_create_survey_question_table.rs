//! Create survey question table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SurveyQuestion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SurveyQuestion::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SurveyQuestion::LawDraftId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SurveyQuestion::Question).text().not_null())
                    .col(
                        ColumnDef::new(SurveyQuestion::Order)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SurveyQuestion::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_survey_question_draft")
                            .from(SurveyQuestion::Table, SurveyQuestion::LawDraftId)
                            .to(LawDraft::Table, LawDraft::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: law_draft_id (listing a draft's questions)
        manager
            .create_index(
                Index::create()
                    .name("idx_survey_question_draft_id")
                    .table(SurveyQuestion::Table)
                    .col(SurveyQuestion::LawDraftId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SurveyQuestion::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SurveyQuestion {
    Table,
    Id,
    LawDraftId,
    Question,
    Order,
    CreatedAt,
}

#[derive(Iden)]
enum LawDraft {
    Table,
    Id,
}
