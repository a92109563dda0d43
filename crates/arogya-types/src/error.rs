use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in arogya-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from calls to third-party HTTP services.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The service has no API key or endpoint configured.
    #[error("{0} is not configured")]
    NotConfigured(String),

    #[error("{service} request failed: {message}")]
    Transport { service: String, message: String },

    #[error("{service} returned HTTP {status}")]
    Status { service: String, status: u16 },

    #[error("{service} returned an unreadable response: {message}")]
    Decode { service: String, message: String },
}

impl UpstreamError {
    pub fn transport(service: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            service: service.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(service: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            service: service.to_string(),
            message: err.to_string(),
        }
    }
}

/// Errors surfaced by the request-level services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("Could not extract a disease from the response.")]
    DiseaseUnknown,

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Errors from the outbreak bulletin pipeline.
#[derive(Debug, Error)]
pub enum OutbreakError {
    #[error("Table not found")]
    TableNotFound,

    #[error("Year {0} not found in the table")]
    YearNotFound(i32),

    #[error("Week {week} not found for year {year}")]
    WeekNotFound { year: i32, week: u32 },

    #[error("Failed to download PDF: {0}")]
    DownloadFailed(u16),

    #[error("bulletin has no pages after removing the header pages")]
    EmptyBulletin,

    #[error("invalid bulletin PDF: {0}")]
    InvalidPdf(String),

    #[error("Failed to parse model response as JSON: {0}")]
    ModelOutput(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
