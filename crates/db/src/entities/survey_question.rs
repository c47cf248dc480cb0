//! Survey question entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "survey_question")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub law_draft_id: String,

    #[sea_orm(column_type = "Text")]
    pub question: String,

    /// Display order within the draft's survey. Not unique; sort only.
    pub order: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::law_draft::Entity",
        from = "Column::LawDraftId",
        to = "super::law_draft::Column::Id",
        on_delete = "Cascade"
    )]
    LawDraft,

    #[sea_orm(has_many = "super::survey_response::Entity")]
    SurveyResponse,
}

impl Related<super::law_draft::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LawDraft.def()
    }
}

impl Related<super::survey_response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SurveyResponse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
