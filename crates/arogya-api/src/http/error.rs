//! Application error type mapping to HTTP status codes.
//!
//! Every error body is `{"error": "<message>"}`. Internal failures are logged
//! and answered with a generic message.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use arogya_types::error::{OutbreakError, RepositoryError, ServiceError, UpstreamError};
use arogya_types::llm::LlmError;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request field.
    Validation(String),
    /// Request body that could not be read; keeps the extractor's status.
    Rejected { status: StatusCode, message: String },
    /// Failure from a request-level service.
    Service(ServiceError),
    /// Failure from the outbreak bulletin pipeline.
    Outbreak(OutbreakError),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        AppError::Service(e)
    }
}

impl From<OutbreakError> for AppError {
    fn from(e: OutbreakError) -> Self {
        AppError::Outbreak(e)
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Rejected {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

fn upstream_status(e: &UpstreamError) -> StatusCode {
    match e {
        UpstreamError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn llm_status(e: &LlmError) -> StatusCode {
    match e {
        LlmError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Rejected { status, message } => (*status, message.clone()),

            AppError::Service(ServiceError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Service(e @ ServiceError::DiseaseUnknown) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Service(ServiceError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Service(ServiceError::Repository(RepositoryError::NotFound)) => {
                (StatusCode::NOT_FOUND, "Chat history not found.".to_string())
            }
            AppError::Service(ServiceError::Repository(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::Service(ServiceError::Llm(e)) => (llm_status(e), e.to_string()),
            AppError::Service(ServiceError::Upstream(e)) => (upstream_status(e), e.to_string()),

            AppError::Outbreak(
                e @ (OutbreakError::TableNotFound
                | OutbreakError::YearNotFound(_)
                | OutbreakError::WeekNotFound { .. }),
            ) => (StatusCode::NOT_FOUND, e.to_string()),
            AppError::Outbreak(OutbreakError::Upstream(e)) => (upstream_status(e), e.to_string()),
            AppError::Outbreak(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), %message, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.status_and_message().0
    }

    #[test]
    fn test_service_error_statuses() {
        assert_eq!(
            status_of(ServiceError::NotFound("gone".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ServiceError::DiseaseUnknown.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::Llm(LlmError::NotConfigured("groq".into())).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(ServiceError::Llm(LlmError::RateLimited).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(
                ServiceError::Upstream(UpstreamError::Status {
                    service: "places".into(),
                    status: 500
                })
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_repository_failure_hides_details() {
        let err: AppError =
            ServiceError::Repository(RepositoryError::Query("no such table: x".into())).into();
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_MESSAGE);
    }

    #[test]
    fn test_outbreak_error_statuses() {
        assert_eq!(
            status_of(OutbreakError::YearNotFound(2019).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(OutbreakError::WeekNotFound { year: 2024, week: 60 }.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(OutbreakError::DownloadFailed(403).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(OutbreakError::ModelOutput("eof".into()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(OutbreakError::Upstream(UpstreamError::NotConfigured("gemini".into())).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
