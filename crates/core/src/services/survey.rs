//! Survey service: batch submission and respondent aggregation.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use lawhear_common::{AppError, AppResult, IdGenerator};
use lawhear_db::{
    entities::{
        survey_question, survey_response,
        user,
        vote::VoteChoice,
    },
    repositories::{LawDraftRepository, SurveyQuestionRepository, SurveyResponseRepository},
};
use sea_orm::Set;

use crate::services::identity::ParticipantIdentity;

/// One answered question within a submit action.
#[derive(Debug, Clone)]
pub struct SurveySubmissionItem {
    pub question_id: String,
    pub answer: VoteChoice,
    pub comment: Option<String>,
}

/// One answer within a respondent record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentAnswer {
    pub question_id: String,
    pub question_text: String,
    pub order: i32,
    pub answer: VoteChoice,
    pub comment: Option<String>,
}

/// All of one participant's answers within a draft's survey.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentRecord {
    pub session_token: String,
    pub user_id: Option<String>,
    pub display_name: String,
    /// Most recent activity across the group's answers.
    pub latest_at: DateTime<FixedOffset>,
    /// Sorted by question display order.
    pub answers: Vec<RespondentAnswer>,
}

/// Survey service for business logic.
#[derive(Clone)]
pub struct SurveyService {
    question_repo: SurveyQuestionRepository,
    response_repo: SurveyResponseRepository,
    draft_repo: LawDraftRepository,
    id_gen: IdGenerator,
}

impl SurveyService {
    /// Create a new survey service.
    #[must_use]
    pub const fn new(
        question_repo: SurveyQuestionRepository,
        response_repo: SurveyResponseRepository,
        draft_repo: LawDraftRepository,
    ) -> Self {
        Self {
            question_repo,
            response_repo,
            draft_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record a survey submission: one upsert per answered question,
    /// all inside a single transaction.
    ///
    /// Answering a strict subset of the draft's questions is valid;
    /// answers accumulate across submit actions and re-answering updates
    /// the existing row. The batch either fully commits or fully rolls
    /// back.
    pub async fn submit(
        &self,
        draft_id: &str,
        identity: &ParticipantIdentity,
        items: Vec<SurveySubmissionItem>,
    ) -> AppResult<Vec<survey_response::Model>> {
        if items.is_empty() {
            // Matches the citizen-facing message on the submission form
            return Err(AppError::Validation("กรุณาตอบอย่างน้อย 1 ข้อ".to_string()));
        }

        self.draft_repo.get_by_id(draft_id).await?;

        // Every target question must belong to this draft
        let known_ids = self.question_repo.ids_for_draft(draft_id).await?;
        for item in &items {
            if !known_ids.contains(&item.question_id) {
                return Err(AppError::QuestionNotFound(item.question_id.clone()));
            }
        }

        let models = items
            .into_iter()
            .map(|item| survey_response::ActiveModel {
                id: Set(self.id_gen.generate()),
                survey_question_id: Set(item.question_id),
                session_token: Set(identity.session_token().to_string()),
                user_id: Set(identity.user_id().map(ToString::to_string)),
                answer: Set(item.answer),
                comment: Set(item.comment),
                updated_at: Set(Some(Utc::now().into())),
                ..Default::default()
            })
            .collect();

        let saved = self.response_repo.upsert_batch(models).await?;

        tracing::info!(
            draft_id = draft_id,
            count = saved.len(),
            "Survey responses recorded"
        );

        Ok(saved)
    }

    /// A draft's questions in display order.
    pub async fn questions_for_draft(
        &self,
        draft_id: &str,
    ) -> AppResult<Vec<survey_question::Model>> {
        self.draft_repo.get_by_id(draft_id).await?;
        self.question_repo.find_by_draft(draft_id).await
    }

    /// Group a draft's responses into one record per respondent.
    ///
    /// Responses are grouped by user id when present, else session token.
    /// This read-time key is asymmetric with the write-time session key:
    /// a logged-in user answering from two sessions appears as one
    /// respondent here while holding two rows per question slot. Records
    /// are ordered most-recently-active first.
    pub async fn responses_by_respondent(
        &self,
        draft_id: &str,
    ) -> AppResult<Vec<RespondentRecord>> {
        self.draft_repo.get_by_id(draft_id).await?;

        let questions = self.question_repo.find_by_draft(draft_id).await?;
        let question_ids: Vec<String> = questions.iter().map(|q| q.id.clone()).collect();
        let rows = self.response_repo.find_for_questions(&question_ids).await?;

        Ok(Self::group_rows(&questions, rows))
    }

    /// Pure grouping step, separated from I/O.
    fn group_rows(
        questions: &[survey_question::Model],
        rows: Vec<(survey_response::Model, Option<user::Model>)>,
    ) -> Vec<RespondentRecord> {
        let question_index: HashMap<&str, &survey_question::Model> =
            questions.iter().map(|q| (q.id.as_str(), q)).collect();

        let mut groups: HashMap<String, RespondentRecord> = HashMap::new();

        for (row, author) in rows {
            // A response row only reaches this point if its question is
            // still alive (rows are fetched by live question id)
            let Some(question) = question_index.get(row.survey_question_id.as_str()) else {
                continue;
            };

            let key = row
                .user_id
                .clone()
                .unwrap_or_else(|| row.session_token.clone());
            let row_latest = row.updated_at.unwrap_or(row.created_at);

            let record = groups.entry(key).or_insert_with(|| RespondentRecord {
                session_token: row.session_token.clone(),
                user_id: row.user_id.clone(),
                display_name: Self::display_name(&row, author.as_ref()),
                latest_at: row_latest,
                answers: Vec::new(),
            });

            // The group surfaces its most recent activity, not the first
            // answer's timestamp
            if row_latest > record.latest_at {
                record.latest_at = row_latest;
            }

            record.answers.push(RespondentAnswer {
                question_id: row.survey_question_id,
                question_text: question.question.clone(),
                order: question.order,
                answer: row.answer,
                comment: row.comment,
            });
        }

        let mut records: Vec<RespondentRecord> = groups.into_values().collect();
        for record in &mut records {
            record.answers.sort_by_key(|a| a.order);
        }
        records.sort_by(|a, b| b.latest_at.cmp(&a.latest_at));
        records
    }

    fn display_name(row: &survey_response::Model, author: Option<&user::Model>) -> String {
        author
            .and_then(|u| u.name.clone().or_else(|| u.email.clone()))
            .unwrap_or_else(|| row.session_token.clone())
    }
}
