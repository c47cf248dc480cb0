//! API endpoints.

mod admin;
mod auth;
mod comments;
mod drafts;
mod sections;
mod surveys;
mod votes;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/votes", votes::router())
        .nest("/sections", sections::router())
        .nest("/drafts", drafts::router())
        .nest("/surveys", surveys::router())
        .nest("/comments", comments::router())
        .nest("/admin", admin::router())
}
