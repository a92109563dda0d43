//! Symptom triage chat endpoint.
//!
//! POST /api/chat/ with `{hid, query}`. Answers with the model's reply and
//! appends the turn to the session.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::extractors::json::{JsonBody, non_blank};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub hid: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub hid: String,
    pub query: String,
    pub response: String,
}

/// POST /api/chat/
pub async fn chat(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let (Some(hid), Some(query)) = (non_blank(body.hid), non_blank(body.query)) else {
        return Err(AppError::Validation("Missing hid or query".to_string()));
    };

    let response = state.triage.respond(&hid, &query).await?;
    Ok(Json(ChatResponse {
        hid,
        query,
        response,
    }))
}
