//! Local health news.
//!
//! POST /api/get-news/ with `{city, country?}`.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use arogya_types::news::NewsFeed;

use crate::http::error::AppError;
use crate::http::extractors::json::{JsonBody, non_blank};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewsRequest {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// POST /api/get-news/
pub async fn get_news(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewsRequest>,
) -> Result<Json<NewsFeed>, AppError> {
    let Some(city) = non_blank(body.city) else {
        return Err(AppError::Validation("City is required.".to_string()));
    };
    let country = non_blank(body.country);

    Ok(Json(state.news.news(&city, country.as_deref()).await?))
}
