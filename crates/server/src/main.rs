//! Lawhear server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use lawhear_api::{middleware::AppState, router as api_router, CaptchaVerifier};
use lawhear_common::Config;
use lawhear_core::{
    ExportService, ModerationService, SurveyService, UserService, VoteService,
};
use lawhear_db::repositories::{
    CommentRepository, LawDraftRepository, LawSectionRepository, SurveyQuestionRepository,
    SurveyResponseRepository, UserRepository, VoteRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lawhear=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting lawhear server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = lawhear_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    lawhear_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let draft_repo = LawDraftRepository::new(Arc::clone(&db));
    let section_repo = LawSectionRepository::new(Arc::clone(&db));
    let vote_repo = VoteRepository::new(Arc::clone(&db));
    let question_repo = SurveyQuestionRepository::new(Arc::clone(&db));
    let response_repo = SurveyResponseRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo);
    let vote_service = VoteService::new(
        vote_repo.clone(),
        section_repo.clone(),
        draft_repo.clone(),
    );
    let survey_service = SurveyService::new(
        question_repo,
        response_repo,
        draft_repo.clone(),
    );
    let export_service = ExportService::new(
        draft_repo,
        section_repo.clone(),
        vote_repo,
        comment_repo.clone(),
        survey_service.clone(),
    );
    let moderation_service = ModerationService::new(comment_repo, section_repo);
    let captcha = CaptchaVerifier::new(config.captcha.clone());

    let state = AppState {
        user_service,
        vote_service,
        survey_service,
        export_service,
        moderation_service,
        captcha,
    };

    // Build the router
    let app = Router::new()
        .merge(api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            lawhear_api::middleware::auth_middleware,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Close the store handle before exiting
    if let Ok(db) = Arc::try_unwrap(db) {
        lawhear_db::close(db).await.ok();
    }
    info!("Shutdown complete");

    Ok(())
}
