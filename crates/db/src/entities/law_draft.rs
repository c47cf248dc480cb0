//! Law draft entity (a piece of proposed legislation open for hearing).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hearing status of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftStatus {
    /// Open for public comment.
    #[sea_orm(string_value = "OPEN")]
    Open,
    /// Hearing period has ended.
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "law_draft")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Subject category (e.g. education, public health)
    pub category: String,

    /// Sponsoring government agency
    pub agency: String,

    pub status: DraftStatus,

    /// Hearing period start
    pub start_date: DateTimeWithTimeZone,

    /// Hearing period end
    pub end_date: DateTimeWithTimeZone,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::law_section::Entity")]
    LawSection,

    #[sea_orm(has_many = "super::survey_question::Entity")]
    SurveyQuestion,
}

impl Related<super::law_section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LawSection.def()
    }
}

impl Related<super::survey_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SurveyQuestion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
