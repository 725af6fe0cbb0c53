//! Liveness check
//!
//! Besides "ok", reports what the service is currently answering from, so an
//! operator can tell an empty import from the built-in sample at a glance.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Initiatives in the dataset in service
    pub initiatives: usize,
    pub is_sample: bool,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let dataset = state.snapshot().await;
    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        initiatives: dataset.parsed.initiatives.len(),
        is_sample: dataset.is_sample,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
