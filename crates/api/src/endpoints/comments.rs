//! Comment endpoints.

use axum::{extract::State, routing::post, Json, Router};
use lawhear_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub section_id: String,
    pub content: String,
}

/// Create comment response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentResponse {
    pub id: String,
}

/// Add a comment to a section. Requires a signed-in user; the comment
/// enters the moderation queue as pending.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<ApiResponse<CreateCommentResponse>> {
    let comment = state
        .moderation_service
        .add_comment(&req.section_id, &user, &req.content)
        .await?;

    Ok(ApiResponse::ok(CreateCommentResponse { id: comment.id }))
}

/// Create the comments router.
pub fn router() -> Router<AppState> {
    Router::new().route("/create", post(create))
}
