//! Survey question and response repositories.

use std::sync::Arc;

use crate::entities::{
    survey_question, survey_response, user, SurveyQuestion, SurveyResponse,
};
use crate::repositories::map_db_err;
use lawhear_common::{AppError, AppResult};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

/// Survey question repository for database operations.
#[derive(Clone)]
pub struct SurveyQuestionRepository {
    db: Arc<DatabaseConnection>,
}

impl SurveyQuestionRepository {
    /// Create a new survey question repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a question by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<survey_question::Model>> {
        SurveyQuestion::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// Get a question by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<survey_question::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::QuestionNotFound(id.to_string()))
    }

    /// List a draft's questions in display order.
    pub async fn find_by_draft(&self, draft_id: &str) -> AppResult<Vec<survey_question::Model>> {
        SurveyQuestion::find()
            .filter(survey_question::Column::LawDraftId.eq(draft_id))
            .order_by_asc(survey_question::Column::Order)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// IDs of a draft's questions.
    pub async fn ids_for_draft(&self, draft_id: &str) -> AppResult<Vec<String>> {
        let ids: Vec<String> = SurveyQuestion::find()
            .select_only()
            .column(survey_question::Column::Id)
            .filter(survey_question::Column::LawDraftId.eq(draft_id))
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(ids)
    }

    /// Create a new question.
    pub async fn create(
        &self,
        model: survey_question::ActiveModel,
    ) -> AppResult<survey_question::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete a question. Its responses cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        SurveyQuestion::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

/// Survey response repository for database operations.
#[derive(Clone)]
pub struct SurveyResponseRepository {
    db: Arc<DatabaseConnection>,
}

impl SurveyResponseRepository {
    /// Create a new survey response repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Upsert a batch of responses inside one transaction.
    ///
    /// A submit action batches one row per answered question; either every
    /// row commits or none do. Each row is a conflict-resolving INSERT on
    /// the (session_token, survey_question_id) unique index, so
    /// re-answering a question overwrites the previous answer in place.
    pub async fn upsert_batch(
        &self,
        models: Vec<survey_response::ActiveModel>,
    ) -> AppResult<Vec<survey_response::Model>> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut saved = Vec::with_capacity(models.len());
        for model in models {
            let result = SurveyResponse::insert(model)
                .on_conflict(
                    OnConflict::columns([
                        survey_response::Column::SessionToken,
                        survey_response::Column::SurveyQuestionId,
                    ])
                    .update_columns([
                        survey_response::Column::Answer,
                        survey_response::Column::Comment,
                        survey_response::Column::UserId,
                        survey_response::Column::UpdatedAt,
                    ])
                    .to_owned(),
                )
                .exec_with_returning(&txn)
                .await;

            match result {
                Ok(row) => saved.push(row),
                Err(e) => {
                    // Roll back and report the write that failed
                    txn.rollback().await.ok();
                    return Err(map_db_err(e));
                }
            }
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(saved)
    }

    /// Find a response by session and question.
    pub async fn find_by_session_and_question(
        &self,
        session_token: &str,
        question_id: &str,
    ) -> AppResult<Option<survey_response::Model>> {
        SurveyResponse::find()
            .filter(survey_response::Column::SessionToken.eq(session_token))
            .filter(survey_response::Column::SurveyQuestionId.eq(question_id))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    /// All responses to the given questions, with their authors when the
    /// respondent was logged in. Newest first.
    pub async fn find_for_questions(
        &self,
        question_ids: &[String],
    ) -> AppResult<Vec<(survey_response::Model, Option<user::Model>)>> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }
        SurveyResponse::find()
            .filter(
                survey_response::Column::SurveyQuestionId.is_in(question_ids.iter().cloned()),
            )
            .order_by_desc(survey_response::Column::CreatedAt)
            .find_also_related(crate::entities::User)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::vote::VoteChoice;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Set};

    fn create_test_question(id: &str, draft_id: &str, order: i32) -> survey_question::Model {
        survey_question::Model {
            id: id.to_string(),
            law_draft_id: draft_id.to_string(),
            question: "ท่านเห็นด้วยหรือไม่".to_string(),
            order,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_response(
        id: &str,
        session_token: &str,
        question_id: &str,
        answer: VoteChoice,
    ) -> survey_response::Model {
        survey_response::Model {
            id: id.to_string(),
            survey_question_id: question_id.to_string(),
            session_token: session_token.to_string(),
            user_id: None,
            answer,
            comment: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_draft_ordered() {
        let q1 = create_test_question("q1", "d1", 1);
        let q2 = create_test_question("q2", "d1", 2);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[q1, q2]])
                .into_connection(),
        );

        let repo = SurveyQuestionRepository::new(db);
        let result = repo.find_by_draft("d1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].order, 1);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_question_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<survey_question::Model>::new()])
                .into_connection(),
        );

        let repo = SurveyQuestionRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::QuestionNotFound(_))));
    }

    #[tokio::test]
    async fn test_upsert_batch_commits_all_rows() {
        let r1 = create_test_response("r1", "abc1234567", "q1", VoteChoice::Agree);
        let r2 = create_test_response("r2", "abc1234567", "q2", VoteChoice::Disagree);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1.clone()], [r2.clone()]])
                .into_connection(),
        );

        let repo = SurveyResponseRepository::new(db);
        let models = vec![
            survey_response::ActiveModel {
                id: Set("r1".to_string()),
                survey_question_id: Set("q1".to_string()),
                session_token: Set("abc1234567".to_string()),
                user_id: Set(None),
                answer: Set(VoteChoice::Agree),
                comment: Set(None),
                ..Default::default()
            },
            survey_response::ActiveModel {
                id: Set("r2".to_string()),
                survey_question_id: Set("q2".to_string()),
                session_token: Set("abc1234567".to_string()),
                user_id: Set(None),
                answer: Set(VoteChoice::Disagree),
                comment: Set(None),
                ..Default::default()
            },
        ];

        let saved = repo.upsert_batch(models).await.unwrap();
        assert_eq!(saved.len(), 2);
    }

    #[tokio::test]
    async fn test_find_for_questions_empty_slice_skips_query() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let repo = SurveyResponseRepository::new(db);
        let result = repo.find_for_questions(&[]).await.unwrap();

        assert!(result.is_empty());
    }
}
