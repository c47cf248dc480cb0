//! Create survey response table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SurveyResponse::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SurveyResponse::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SurveyResponse::SurveyQuestionId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SurveyResponse::SessionToken)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SurveyResponse::UserId).string_len(32))
                    .col(
                        ColumnDef::new(SurveyResponse::Answer)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SurveyResponse::Comment).text())
                    .col(
                        ColumnDef::new(SurveyResponse::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(SurveyResponse::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_survey_response_question")
                            .from(SurveyResponse::Table, SurveyResponse::SurveyQuestionId)
                            .to(SurveyQuestion::Table, SurveyQuestion::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_survey_response_user")
                            .from(SurveyResponse::Table, SurveyResponse::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (session_token, survey_question_id) - one answer
        // per session per question. The upsert's conflict target.
        manager
            .create_index(
                Index::create()
                    .name("idx_survey_response_session_question")
                    .table(SurveyResponse::Table)
                    .col(SurveyResponse::SessionToken)
                    .col(SurveyResponse::SurveyQuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: survey_question_id (aggregation joins per draft)
        manager
            .create_index(
                Index::create()
                    .name("idx_survey_response_question_id")
                    .table(SurveyResponse::Table)
                    .col(SurveyResponse::SurveyQuestionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SurveyResponse::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SurveyResponse {
    Table,
    Id,
    SurveyQuestionId,
    SessionToken,
    UserId,
    Answer,
    Comment,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SurveyQuestion {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
