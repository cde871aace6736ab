use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{error::ApiError, format::wrap_text, state::AppState};
use crate::application::ReplyKind;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub kind: ReplyKind,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResultResponse {
    pub chunk_id: Uuid,
    pub chunk_index: usize,
    pub content: String,
    pub score: f32,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }

    let reply = state.session.lock().await.ask(&request.message).await?;

    Ok(Json(ChatResponse {
        answer: wrap_text(&reply.text, state.wrap_width()),
        kind: reply.kind,
    }))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<SearchResultResponse>>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".into()));
    }

    let results = state.session.lock().await.search(&request.query).await?;

    Ok(Json(
        results
            .into_iter()
            .map(|r| SearchResultResponse {
                chunk_id: r.chunk.id,
                chunk_index: r.chunk.chunk_index,
                content: r.chunk.content,
                score: r.score,
            })
            .collect(),
    ))
}
