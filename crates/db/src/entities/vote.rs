//! Vote entity (one participant's stance on one law section).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// AGREE/DISAGREE stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteChoice {
    #[sea_orm(string_value = "AGREE")]
    Agree,
    #[sea_orm(string_value = "DISAGREE")]
    Disagree,
}

impl VoteChoice {
    /// The wire/export spelling of this choice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Agree => "AGREE",
            Self::Disagree => "DISAGREE",
        }
    }
}

/// One row per (session_token, law_section_id), enforced by a unique
/// index, with writes going through an ON CONFLICT upsert.
///
/// The session token is the uniqueness key even for logged-in users: votes
/// are scoped to one browser tab, and the same account voting from two
/// tabs holds two rows. `user_id` is attribution only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vote")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub law_section_id: String,

    /// Client-generated anonymous session token (min length 10)
    pub session_token: String,

    /// Attribution when the participant was logged in
    #[sea_orm(nullable)]
    pub user_id: Option<String>,

    pub choice: VoteChoice,

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
        on_delete = "SetNull"
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
