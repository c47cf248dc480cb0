//! Admin endpoints: moderation queue, respondent viewer, CSV export.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use lawhear_common::{AppError, AppResult};
use lawhear_core::{CommentPage, RespondentRecord};
use lawhear_db::entities::comment::CommentStatus;
use lawhear_db::entities::user;
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

fn require_admin(user: &user::Model) -> AppResult<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

/// Moderation queue query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    pub status: Option<CommentStatus>,
    pub draft_id: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

const fn default_page() -> u64 {
    1
}

const fn default_limit() -> u64 {
    20
}

/// List comments for moderation (admin only).
async fn list_comments(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListCommentsQuery>,
) -> AppResult<ApiResponse<CommentPage>> {
    require_admin(&user)?;

    let page = state
        .moderation_service
        .list(query.status, query.draft_id.as_deref(), query.page, query.limit)
        .await?;

    Ok(ApiResponse::ok(page))
}

/// Set comment status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCommentStatusRequest {
    pub status: CommentStatus,
}

/// Approve or reject a comment (admin only).
async fn set_comment_status(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(req): Json<SetCommentStatusRequest>,
) -> AppResult<impl IntoResponse> {
    require_admin(&user)?;

    state
        .moderation_service
        .set_status(&comment_id, req.status)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Survey responses grouped by respondent (admin only).
async fn draft_responses(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
) -> AppResult<ApiResponse<Vec<RespondentRecord>>> {
    require_admin(&user)?;

    let records = state
        .survey_service
        .responses_by_respondent(&draft_id)
        .await?;

    Ok(ApiResponse::ok(records))
}

/// Export query.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// `sections` (default) or `survey`.
    #[serde(rename = "type")]
    pub export_type: Option<String>,
}

/// Download a draft's data as CSV (admin only).
///
/// Returned as a `text/csv; charset=utf-8` attachment with the content
/// BOM-prefixed. Any failure surfaces as an error status with no partial
/// file delivered.
async fn export_draft(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    require_admin(&user)?;

    let export = match query.export_type.as_deref() {
        Some("survey") => state.export_service.survey_csv(&draft_id).await?,
        _ => state.export_service.sections_csv(&draft_id).await?,
    };

    let disposition = format!("attachment; filename=\"{}\"", export.filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

/// Create the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments))
        .route("/comments/{id}/status", post(set_comment_status))
        .route("/drafts/{id}/responses", get(draft_responses))
        .route("/drafts/{id}/export", get(export_draft))
}
