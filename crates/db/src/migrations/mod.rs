//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_user_table;
mod m20250601_000002_create_law_draft_table;
mod m20250601_000003_create_law_section_table;
mod m20250601_000004_create_vote_table;
mod m20250601_000005_create_survey_question_table;
mod m20250601_000006_create_survey_response_table;
mod m20250601_000007_create_comment_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_user_table::Migration),
            Box::new(m20250601_000002_create_law_draft_table::Migration),
            Box::new(m20250601_000003_create_law_section_table::Migration),
            Box::new(m20250601_000004_create_vote_table::Migration),
            Box::new(m20250601_000005_create_survey_question_table::Migration),
            Box::new(m20250601_000006_create_survey_response_table::Migration),
            Box::new(m20250601_000007_create_comment_table::Migration),
        ]
    }
}
