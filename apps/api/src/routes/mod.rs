pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/find_jobs", post(handlers::handle_find_jobs))
        .route("/api/analyze_skills", post(handlers::handle_analyze_skills))
        .route(
            "/api/learning_resources",
            post(handlers::handle_learning_resources),
        )
        .route("/api/catalog/reload", post(handlers::handle_reload_catalog))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
