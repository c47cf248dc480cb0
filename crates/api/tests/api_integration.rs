//! API integration tests.
//!
//! These tests drive the router against a mock database connection.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lawhear_api::{middleware::AppState, router as api_router, CaptchaVerifier};
use lawhear_common::config::CaptchaConfig;
use lawhear_core::{
    ExportService, ModerationService, SurveyService, UserService, VoteService,
};
use lawhear_db::repositories::{
    CommentRepository, LawDraftRepository, LawSectionRepository, SurveyQuestionRepository,
    SurveyResponseRepository, UserRepository, VoteRepository,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

/// Build an application router over the given mock connection.
fn create_test_app(db: DatabaseConnection) -> Router {
    let db = Arc::new(db);

    let user_repo = UserRepository::new(Arc::clone(&db));
    let draft_repo = LawDraftRepository::new(Arc::clone(&db));
    let section_repo = LawSectionRepository::new(Arc::clone(&db));
    let vote_repo = VoteRepository::new(Arc::clone(&db));
    let question_repo = SurveyQuestionRepository::new(Arc::clone(&db));
    let response_repo = SurveyResponseRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));

    let survey_service = SurveyService::new(question_repo, response_repo, draft_repo.clone());
    let state = AppState {
        user_service: UserService::new(user_repo),
        vote_service: VoteService::new(
            vote_repo.clone(),
            section_repo.clone(),
            draft_repo.clone(),
        ),
        survey_service: survey_service.clone(),
        export_service: ExportService::new(
            draft_repo,
            section_repo,
            vote_repo,
            comment_repo,
            survey_service,
        ),
        moderation_service: ModerationService::new(
            CommentRepository::new(Arc::clone(&db)),
            LawSectionRepository::new(Arc::clone(&db)),
        ),
        captcha: CaptchaVerifier::new(CaptchaConfig::default()),
    };

    Router::new()
        .merge(api_router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            lawhear_api::middleware::auth_middleware,
        ))
        .with_state(state)
}

fn empty_mock_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_cast_vote_rejects_short_session_token() {
    let app = create_test_app(empty_mock_db());

    let request = Request::builder()
        .method("POST")
        .uri("/votes/cast")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "sectionId": "s1",
                "choice": "AGREE",
                "sessionToken": "short"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INVALID_SESSION");
}

#[tokio::test]
async fn test_cast_vote_unknown_section_is_404() {
    // Section lookup returns no rows
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<lawhear_db::entities::law_section::Model>::new()])
        .into_connection();
    let app = create_test_app(db);

    let request = Request::builder()
        .method("POST")
        .uri("/votes/cast")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "sectionId": "missing",
                "choice": "AGREE",
                "sessionToken": "abc1234567"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "SECTION_NOT_FOUND");
}

#[tokio::test]
async fn test_submit_survey_rejects_empty_submission() {
    // Validation fires before any storage access
    let app = create_test_app(empty_mock_db());

    let request = Request::builder()
        .method("POST")
        .uri("/surveys/submit")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "draftId": "d1",
                "sessionToken": "abc1234567",
                "captchaToken": "",
                "submissions": []
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_admin_export_requires_auth() {
    let app = create_test_app(empty_mock_db());

    let request = Request::builder()
        .method("GET")
        .uri("/admin/drafts/d1/export?type=survey")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_comments_requires_auth() {
    let app = create_test_app(empty_mock_db());

    let request = Request::builder()
        .method("GET")
        .uri("/admin/comments")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_comment_requires_auth() {
    let app = create_test_app(empty_mock_db());

    let request = Request::builder()
        .method("POST")
        .uri("/comments/create")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "sectionId": "s1",
                "content": "ความเห็น"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_section_tally_unknown_section_is_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<lawhear_db::entities::law_section::Model>::new()])
        .into_connection();
    let app = create_test_app(db);

    let request = Request::builder()
        .method("GET")
        .uri("/sections/missing/tally")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
