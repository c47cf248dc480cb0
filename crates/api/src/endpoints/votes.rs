//! Vote endpoints.

use axum::{extract::State, routing::post, Json, Router};
use lawhear_common::AppResult;
use lawhear_core::{ParticipantIdentity, SectionTally};
use lawhear_db::entities::vote::VoteChoice;
use serde::{Deserialize, Serialize};

use crate::{extractors::MaybeAuthUser, middleware::AppState, response::ApiResponse};

/// Tally with derived percentages, as rendered by progress bars.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyResponse {
    pub agree: u64,
    pub disagree: u64,
    pub agree_percent: u32,
    pub disagree_percent: u32,
}

impl From<SectionTally> for TallyResponse {
    fn from(tally: SectionTally) -> Self {
        Self {
            agree: tally.agree,
            disagree: tally.disagree,
            agree_percent: tally.agree_percent(),
            disagree_percent: tally.disagree_percent(),
        }
    }
}

/// Cast vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub section_id: String,
    pub choice: VoteChoice,
    pub session_token: String,
}

/// Cast vote response: the recorded choice plus the fresh tally, so the
/// caller renders its own write.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteResponse {
    pub choice: VoteChoice,
    pub tally: TallyResponse,
}

/// Cast (or switch) a vote on a section.
async fn cast(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<CastVoteRequest>,
) -> AppResult<ApiResponse<CastVoteResponse>> {
    let identity =
        ParticipantIdentity::resolve(&req.session_token, maybe_user.as_ref().map(|u| u.id.as_str()))?;

    let vote = state
        .vote_service
        .cast(&req.section_id, &identity, req.choice)
        .await?;
    let tally = state.vote_service.tally(&req.section_id).await?;

    Ok(ApiResponse::ok(CastVoteResponse {
        choice: vote.choice,
        tally: tally.into(),
    }))
}

/// Remove vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveVoteRequest {
    pub section_id: String,
    pub session_token: String,
}

/// Remove vote response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveVoteResponse {
    pub tally: TallyResponse,
}

/// Remove a vote from a section. Removing a vote that was never cast is
/// a no-op.
async fn remove(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<RemoveVoteRequest>,
) -> AppResult<ApiResponse<RemoveVoteResponse>> {
    let identity =
        ParticipantIdentity::resolve(&req.session_token, maybe_user.as_ref().map(|u| u.id.as_str()))?;

    state.vote_service.remove(&req.section_id, &identity).await?;
    let tally = state.vote_service.tally(&req.section_id).await?;

    Ok(ApiResponse::ok(RemoveVoteResponse {
        tally: tally.into(),
    }))
}

/// Create the votes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cast", post(cast))
        .route("/remove", post(remove))
}
