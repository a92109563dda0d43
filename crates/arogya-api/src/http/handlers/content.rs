//! Video and article recommendations for a session's latest diagnosis.
//!
//! POST /api/get-content/ with `{hid}`.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use arogya_types::content::ContentBundle;

use crate::http::error::AppError;
use crate::http::extractors::json::{JsonBody, non_blank};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    pub hid: Option<String>,
}

/// POST /api/get-content/
pub async fn get_content(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ContentRequest>,
) -> Result<Json<ContentBundle>, AppError> {
    let Some(hid) = non_blank(body.hid) else {
        return Err(AppError::Validation("HID is required.".to_string()));
    };

    Ok(Json(state.content.recommend(&hid).await?))
}
