//! Comment entity (free-text feedback on a section, moderated).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Moderation state of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentStatus {
    /// Awaiting moderation. Not publicly visible.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Approved for public display.
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    /// Rejected by a moderator.
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub law_section_id: String,

    /// Comments require an authenticated author
    pub user_id: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub status: CommentStatus,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::law_section::Entity",
        from = "Column::LawSectionId",
        to = "super::law_section::Column::Id",
        on_delete = "Cascade"
    )]
    LawSection,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::law_section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LawSection.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
