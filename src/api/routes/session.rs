use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::{error::ApiError, format::wrap_text, state::AppState};
use crate::domain::{ConversationTurn, TurnRole};

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub status: String,
    pub message: String,
    pub source: String,
    pub chunks: usize,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub role: TurnRole,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub source: Option<String>,
    pub turns: Vec<TurnResponse>,
}

pub async fn process_page(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let mut session = state.session.lock().await;

    let summary = session.ingest(&request.url).await.map_err(|e| {
        tracing::warn!(error = %e, url = %request.url, "failed to process page");
        ApiError::from(e)
    })?;

    Ok(Json(ProcessResponse {
        status: "processed".into(),
        message: "Webpage processed successfully!".into(),
        source: summary.source,
        chunks: summary.chunks,
    }))
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let session = state.session.lock().await;
    let width = state.wrap_width();

    Json(HistoryResponse {
        source: session.source().map(str::to_string),
        turns: session
            .history()
            .iter()
            .map(|turn| render_turn(turn, width))
            .collect(),
    })
}

pub async fn reset_session(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.reset();
    StatusCode::NO_CONTENT
}

fn render_turn(turn: &ConversationTurn, width: usize) -> TurnResponse {
    let content = match turn.role {
        TurnRole::Assistant => wrap_text(&turn.content, width),
        TurnRole::User => turn.content.clone(),
    };
    TurnResponse {
        role: turn.role,
        content,
        created_at: turn.created_at,
    }
}
