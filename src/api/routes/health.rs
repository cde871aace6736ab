use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub source: Option<String>,
    pub chunks: usize,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Ready once a page has been processed and questions can be answered.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let session = state.session.lock().await;

    let response = ReadinessResponse {
        status: if session.is_bound() { "ready" } else { "not_ready" }.into(),
        source: session.source().map(str::to_string),
        chunks: session.chunk_count(),
    };

    let status = if session.is_bound() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
