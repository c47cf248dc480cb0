//! Draft read endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use lawhear_common::AppResult;

use crate::endpoints::votes::TallyResponse;
use crate::{middleware::AppState, response::ApiResponse};

/// Draft-level totals: the sum of the draft's section tallies, recomputed
/// from the stored rows on every read.
async fn tally(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
) -> AppResult<ApiResponse<TallyResponse>> {
    let tally = state.vote_service.draft_tally(&draft_id).await?;
    Ok(ApiResponse::ok(tally.into()))
}

/// Create the drafts router.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/tally", get(tally))
}
