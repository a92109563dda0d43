//! Medical report summarization.

use arogya_types::error::ServiceError;
use arogya_types::report::{Document, ReportSummary};

use crate::document::{DocumentModel, GenerationRequest, ObjectStore, upload_and_generate};

pub const SUMMARY_PROMPT: &str = "Extract and summarize key medical information from this report.";

pub const SUMMARY_SYSTEM_INSTRUCTION: &str = "You are an AI-powered medical assistant designed to extract, analyze, and summarize key medical information from medical reports. Identify the patient details, test names, measured values with their reference ranges, abnormal findings, diagnoses and any recommendations. Present the result as structured JSON and do not invent values that are not in the report.";

fn summary_request() -> GenerationRequest {
    GenerationRequest {
        prompt: SUMMARY_PROMPT.to_string(),
        system_instruction: Some(SUMMARY_SYSTEM_INSTRUCTION.to_string()),
        response_mime_type: Some("application/json".to_string()),
    }
}

/// Summarizes uploaded reports and, when storage is configured, keeps a copy
/// behind a signed link.
pub struct ReportService<M: DocumentModel, S: ObjectStore> {
    model: M,
    store: Option<S>,
}

impl<M: DocumentModel, S: ObjectStore> ReportService<M, S> {
    pub fn new(model: M, store: Option<S>) -> Self {
        Self { model, store }
    }

    #[tracing::instrument(
        name = "summarize_report",
        skip(self, document),
        fields(file_name = %document.file_name, size = document.bytes.len())
    )]
    pub async fn summarize(&self, document: &Document) -> Result<ReportSummary, ServiceError> {
        if document.bytes.is_empty() {
            return Err(ServiceError::InvalidInput("Uploaded document is empty.".to_string()));
        }

        let summary = upload_and_generate(&self.model, document, &summary_request()).await?;

        let file_url = match &self.store {
            Some(store) => Some(store.put_signed(document).await?),
            None => {
                tracing::debug!("object storage not configured; no file_url");
                None
            }
        };

        Ok(ReportSummary { summary, file_url })
    }
}
