//! Section read endpoints (tallies and approved comments).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use lawhear_common::AppResult;
use lawhear_core::{CommentView, ParticipantIdentity};
use lawhear_db::entities::vote::VoteChoice;
use serde::{Deserialize, Serialize};

use crate::endpoints::votes::TallyResponse;
use crate::{extractors::MaybeAuthUser, middleware::AppState, response::ApiResponse};

/// Get one section's vote tally.
async fn tally(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> AppResult<ApiResponse<TallyResponse>> {
    let tally = state.vote_service.tally(&section_id).await?;
    Ok(ApiResponse::ok(tally.into()))
}

/// Approved comments for a section.
async fn comments(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> AppResult<ApiResponse<Vec<CommentView>>> {
    let comments = state
        .moderation_service
        .approved_for_section(&section_id)
        .await?;
    Ok(ApiResponse::ok(comments))
}

/// Current-vote query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyVoteQuery {
    pub session_token: String,
}

/// Current-vote response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyVoteResponse {
    pub choice: Option<VoteChoice>,
}

/// The calling participant's current vote on a section, if any.
async fn my_vote(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Query(query): Query<MyVoteQuery>,
) -> AppResult<ApiResponse<MyVoteResponse>> {
    let identity = ParticipantIdentity::resolve(
        &query.session_token,
        maybe_user.as_ref().map(|u| u.id.as_str()),
    )?;

    let vote = state
        .vote_service
        .find_for_participant(&section_id, &identity)
        .await?;

    Ok(ApiResponse::ok(MyVoteResponse {
        choice: vote.map(|v| v.choice),
    }))
}

/// Create the sections router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/tally", get(tally))
        .route("/{id}/comments", get(comments))
        .route("/{id}/vote", get(my_vote))
}
