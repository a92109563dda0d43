//! Disease-aware hospital search.
//!
//! POST /api/get-hospitals/ with `{hid, location}`.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use arogya_types::places::HospitalSearch;

use crate::http::error::AppError;
use crate::http::extractors::json::{JsonBody, non_blank};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HospitalRequest {
    pub hid: Option<String>,
    pub location: Option<String>,
}

/// POST /api/get-hospitals/
pub async fn get_hospitals(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<HospitalRequest>,
) -> Result<Json<HospitalSearch>, AppError> {
    let (Some(hid), Some(location)) = (non_blank(body.hid), non_blank(body.location)) else {
        return Err(AppError::Validation(
            "HID and location are required.".to_string(),
        ));
    };

    Ok(Json(state.hospitals.find(&hid, &location).await?))
}
