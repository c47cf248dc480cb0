//! Survey response entity (one participant's answer to one question).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::vote::VoteChoice;

/// One row per (session_token, survey_question_id), with the same upsert
/// discipline as votes. Partial submissions accumulate across submit
/// actions; re-answering a question updates its row in place.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "survey_response")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub survey_question_id: String,

    /// Client-generated anonymous session token (min length 10)
    pub session_token: String,

    /// Attribution when the participant was logged in
    #[sea_orm(nullable)]
    pub user_id: Option<String>,

    pub answer: VoteChoice,

    /// Optional free-text elaboration
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::survey_question::Entity",
        from = "Column::SurveyQuestionId",
        to = "super::survey_question::Column::Id",
        on_delete = "Cascade"
    )]
    SurveyQuestion,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::survey_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SurveyQuestion.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
