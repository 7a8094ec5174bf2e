pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::ats::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Path used by the browser extension
        .route("/ats-check", post(handlers::handle_ats_check))
        .route("/api/v1/ats/check", post(handlers::handle_ats_check))
        .route(
            "/api/v1/job-text/resolve",
            post(handlers::handle_resolve_job_text),
        )
        .route(
            "/api/v1/job-text/selectors",
            get(handlers::handle_job_text_selectors),
        )
        .fallback(not_found)
        .with_state(state)
}
