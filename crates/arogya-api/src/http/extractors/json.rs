//! JSON body extractor with `{"error": ...}` rejections.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::http::error::AppError;

/// JSON request body parsed regardless of the `Content-Type` header.
///
/// Buffering failures keep their status (413 past the body limit); a body
/// that is not valid JSON for `T` is an [`AppError::Validation`] (400).
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            AppError::Validation(format!("Failed to parse the request body as JSON: {e}"))
        })
    }
}

/// Treat absent and blank string fields alike.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
