//! Vote repository.
//!
//! Writes go through a single conflict-resolving INSERT so that two
//! concurrent casts from the same session (a rapid double-click) converge
//! on one row instead of racing a read-then-write check.

use std::sync::Arc;

use crate::entities::{vote, Vote};
use crate::repositories::map_db_err;
use lawhear_common::AppResult;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

/// Vote repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a vote, or overwrite the choice of the existing row for the
    /// same (session, section) key.
    ///
    /// The unique index on (session_token, law_section_id) is the conflict
    /// target; switching AGREE to DISAGREE is an in-place update.
    pub async fn upsert(&self, model: vote::ActiveModel) -> AppResult<vote::Model> {
        Vote::insert(model)
            .on_conflict(
                OnConflict::columns([vote::Column::SessionToken, vote::Column::LawSectionId])
                    .update_columns([
                        vote::Column::Choice,
                        vote::Column::UserId,
                        vote::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Find a vote by session and section.
    pub async fn find_by_session_and_section(
        &self,
        session_token: &str,
        section_id: &str,
    ) -> AppResult<Option<vote::Model>> {
        Vote::find()
            .filter(vote::Column::SessionToken.eq(session_token))
            .filter(vote::Column::LawSectionId.eq(section_id))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Delete a vote by session and section. Missing rows are a no-op.
    pub async fn delete_by_session_and_section(
        &self,
        session_token: &str,
        section_id: &str,
    ) -> AppResult<()> {
        Vote::delete_many()
            .filter(vote::Column::SessionToken.eq(session_token))
            .filter(vote::Column::LawSectionId.eq(section_id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    /// Count votes for one section with the given choice.
    pub async fn count_by_section_and_choice(
        &self,
        section_id: &str,
        choice: vote::VoteChoice,
    ) -> AppResult<u64> {
        Vote::find()
            .filter(vote::Column::LawSectionId.eq(section_id))
            .filter(vote::Column::Choice.eq(choice))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Count votes across a set of sections with the given choice.
    ///
    /// Used for draft-level totals, which are always recomputed from the
    /// underlying rows rather than kept in a counter.
    pub async fn count_by_sections_and_choice(
        &self,
        section_ids: &[String],
        choice: vote::VoteChoice,
    ) -> AppResult<u64> {
        if section_ids.is_empty() {
            return Ok(0);
        }
        Vote::find()
            .filter(vote::Column::LawSectionId.is_in(section_ids.iter().cloned()))
            .filter(vote::Column::Choice.eq(choice))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_vote(
        id: &str,
        session_token: &str,
        section_id: &str,
        choice: vote::VoteChoice,
    ) -> vote::Model {
        vote::Model {
            id: id.to_string(),
            law_section_id: section_id.to_string(),
            session_token: session_token.to_string(),
            user_id: None,
            choice,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_returns_row() {
        let vote = create_test_vote("v1", "abc1234567", "s1", vote::VoteChoice::Agree);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[vote.clone()]])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let model = vote::ActiveModel {
            id: sea_orm::Set("v1".to_string()),
            law_section_id: sea_orm::Set("s1".to_string()),
            session_token: sea_orm::Set("abc1234567".to_string()),
            user_id: sea_orm::Set(None),
            choice: sea_orm::Set(vote::VoteChoice::Agree),
            ..Default::default()
        };
        let result = repo.upsert(model).await.unwrap();

        assert_eq!(result.id, "v1");
        assert_eq!(result.choice, vote::VoteChoice::Agree);
    }

    #[tokio::test]
    async fn test_find_by_session_and_section_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<vote::Model>::new()])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo
            .find_by_session_and_section("abc1234567", "s1")
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo
            .delete_by_session_and_section("abc1234567", "s1")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_count_by_section_and_choice() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let count = repo
            .count_by_section_and_choice("s1", vote::VoteChoice::Agree)
            .await
            .unwrap();

        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_count_by_sections_empty_slice_skips_query() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let repo = VoteRepository::new(db);
        let count = repo
            .count_by_sections_and_choice(&[], vote::VoteChoice::Agree)
            .await
            .unwrap();

        assert_eq!(count, 0);
    }
}
