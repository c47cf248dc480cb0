//! Law section entity (a numbered clause of a draft, the unit of voting).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "law_section")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub law_draft_id: String,

    /// Display label, e.g. "มาตรา 3". Also the sort key.
    pub section_no: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

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

    #[sea_orm(has_many = "super::vote::Entity")]
    Vote,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::law_draft::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LawDraft.def()
    }
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vote.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
