//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use lawhear_core::{
    ExportService, ModerationService, SurveyService, UserService, VoteService,
};

use crate::captcha::CaptchaVerifier;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub vote_service: VoteService,
    pub survey_service: SurveyService,
    pub export_service: ExportService,
    pub moderation_service: ModerationService,
    pub captcha: CaptchaVerifier,
}

/// Authentication middleware.
///
/// Resolves a bearer token into a user and stashes it in request
/// extensions for the [`crate::extractors::AuthUser`] extractors. Requests
/// without a valid token pass through anonymously.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        // Authenticate user by token
        if let Ok(user) = state.user_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
