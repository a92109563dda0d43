//! Weekly outbreak bulletin pipeline.
//!
//! Locate the bulletin for a year/week on the publisher's index page,
//! download it, drop the cover pages, have the document model extract the
//! outbreaks as JSON, and geocode each district into a map marker.

pub mod markers;
pub mod service;

use arogya_types::error::OutbreakError;
use arogya_types::outbreak::OutbreakExtraction;

use crate::chat::extractor::strip_code_fence;

/// Finds and downloads bulletin PDFs.
pub trait BulletinSource: Send + Sync {
    /// Resolve the download URL of the bulletin for `year`/`week`.
    fn locate(
        &self,
        year: i32,
        week: u32,
    ) -> impl std::future::Future<Output = Result<String, OutbreakError>> + Send;

    fn download(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, OutbreakError>> + Send;
}

/// Removes leading pages from a PDF.
pub trait PageTrimmer: Send + Sync {
    fn drop_leading_pages(&self, pdf: &[u8], count: u32) -> Result<Vec<u8>, OutbreakError>;
}

pub const OUTBREAK_PROMPT: &str = r#"Extract information about disease outbreaks from this report.
For each outbreak, identify:
1. District/location name
2. Disease name
3. Number of cases

Return the data strictly in the following JSON format. If any data of a district is missing, skip that entry. This format must be maintained:

{
  "outbreaks": [
    {
      "district": "Vizianagaram",
      "disease": "Acute Diarrheal Disease",
      "cases": 15
    },
    {
      "district": "East Kameng",
      "disease": "Human Rabies",
      "cases": 1
    },
    {
      "district": "Thrissur",
      "disease": "Food Poisoning",
      "cases": 107
    }
  ]
}"#;

/// Parse the document model's answer into outbreak records.
pub fn parse_outbreaks(text: &str) -> Result<OutbreakExtraction, OutbreakError> {
    serde_json::from_str(strip_code_fence(text.trim()))
        .map_err(|e| OutbreakError::ModelOutput(e.to_string()))
}
