//! Create vote table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vote::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vote::LawSectionId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Vote::SessionToken)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Vote::UserId).string_len(32))
                    .col(ColumnDef::new(Vote::Choice).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Vote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Vote::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_section")
                            .from(Vote::Table, Vote::LawSectionId)
                            .to(LawSection::Table, LawSection::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_user")
                            .from(Vote::Table, Vote::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (session_token, law_section_id) - one vote per
        // session per section. The upsert's conflict target.
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_session_section")
                    .table(Vote::Table)
                    .col(Vote::SessionToken)
                    .col(Vote::LawSectionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: law_section_id (tally counts per section)
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_section_id")
                    .table(Vote::Table)
                    .col(Vote::LawSectionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vote::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vote {
    Table,
    Id,
    LawSectionId,
    SessionToken,
    UserId,
    Choice,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum LawSection {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
