use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the record document is readable.
    pub store_healthy: bool,
    /// Configured behaviour for unreadable documents.
    pub read_policy: &'static str,
}

/// GET /health -- returns service and record store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = state.projects.store_healthy().await;

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_healthy,
        read_policy: state.config.read_policy.as_str(),
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
