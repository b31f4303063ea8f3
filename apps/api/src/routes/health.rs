use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::catalog::JobSource;
use crate::state::AppState;

/// GET /health
/// Returns service status, version, and the size of the loaded catalog.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let jobs = state.catalog.snapshot().map(|c| c.len()).ok();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-api",
        "jobs": jobs,
    }))
}
