//! Medical report upload and summarization.
//!
//! POST /api/upload-report/ with a multipart `document` part. The bytes stay
//! in memory; nothing is written to local disk.

use axum::Json;
use axum::extract::{Multipart, State};

use arogya_infra::storage::detect_mime;
use arogya_types::report::{Document, ReportSummary};

use crate::http::error::AppError;
use crate::state::AppState;

/// Multipart field carrying the report.
const DOCUMENT_FIELD: &str = "document";

/// Pull the `document` part out of a multipart body, skipping other parts.
async fn read_document(multipart: &mut Multipart) -> Result<Document, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(DOCUMENT_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("report").to_string();
        let content_type = field
            .content_type()
            .map(str::to_string)
            .filter(|ct| ct != "application/octet-stream")
            .unwrap_or_else(|| detect_mime(&file_name));
        let bytes = field.bytes().await?;

        if bytes.is_empty() {
            return Err(AppError::Validation(
                "The submitted file is empty.".to_string(),
            ));
        }
        return Ok(Document::new(file_name, content_type, bytes.to_vec()));
    }

    Err(AppError::Validation("No file was submitted.".to_string()))
}

/// POST /api/upload-report/
pub async fn upload_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReportSummary>, AppError> {
    let document = read_document(&mut multipart).await?;
    tracing::info!(
        file_name = %document.file_name,
        content_type = %document.content_type,
        bytes = document.bytes.len(),
        "report received"
    );

    Ok(Json(state.reports.summarize(&document).await?))
}
