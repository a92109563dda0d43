//! Uploaded documents and report summaries.

use serde::{Deserialize, Serialize};

/// A document received from a client upload.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// A file registered with the multimodal model's file API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub uri: String,
    pub mime_type: String,
}

/// Summary of an uploaded medical report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}
