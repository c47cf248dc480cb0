//! Survey submission endpoint.

use axum::{extract::State, routing::post, Json, Router};
use lawhear_common::AppResult;
use lawhear_core::{ParticipantIdentity, SurveySubmissionItem};
use lawhear_db::entities::vote::VoteChoice;
use serde::{Deserialize, Serialize};

use crate::{extractors::MaybeAuthUser, middleware::AppState, response::ApiResponse};

/// One answered question in a submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
    pub question_id: String,
    pub answer: VoteChoice,
    pub comment: Option<String>,
}

/// Survey submission request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSurveyRequest {
    pub draft_id: String,
    pub session_token: String,
    pub captcha_token: String,
    pub submissions: Vec<SubmissionItem>,
}

/// Survey submission response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSurveyResponse {
    pub saved: usize,
}

/// Submit survey answers.
///
/// CAPTCHA is verified first, then the identity, then the whole batch is
/// recorded in one transaction: either every answer is saved or none.
async fn submit(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<SubmitSurveyRequest>,
) -> AppResult<ApiResponse<SubmitSurveyResponse>> {
    state.captcha.verify(&req.captcha_token).await?;

    let identity =
        ParticipantIdentity::resolve(&req.session_token, maybe_user.as_ref().map(|u| u.id.as_str()))?;

    let items = req
        .submissions
        .into_iter()
        .map(|s| SurveySubmissionItem {
            question_id: s.question_id,
            answer: s.answer,
            comment: s.comment,
        })
        .collect();

    let saved = state
        .survey_service
        .submit(&req.draft_id, &identity, items)
        .await?;

    Ok(ApiResponse::ok(SubmitSurveyResponse { saved: saved.len() }))
}

/// Create the surveys router.
pub fn router() -> Router<AppState> {
    Router::new().route("/submit", post(submit))
}
