//! PDF page removal with lopdf.

use lopdf::Document;

use arogya_core::outbreak::PageTrimmer;
use arogya_types::error::OutbreakError;

/// [`PageTrimmer`] that rewrites the document without its first pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfTrimmer;

impl PageTrimmer for LopdfTrimmer {
    fn drop_leading_pages(&self, pdf: &[u8], count: u32) -> Result<Vec<u8>, OutbreakError> {
        let mut document =
            Document::load_mem(pdf).map_err(|e| OutbreakError::InvalidPdf(e.to_string()))?;

        let total = document.get_pages().len() as u32;
        if total <= count {
            return Err(OutbreakError::EmptyBulletin);
        }

        if count > 0 {
            let leading: Vec<u32> = (1..=count).collect();
            document.delete_pages(&leading);
            document.prune_objects();
        }

        let mut out = Vec::with_capacity(pdf.len());
        document
            .save_to(&mut out)
            .map_err(|e| OutbreakError::InvalidPdf(e.to_string()))?;

        tracing::debug!(total, removed = count, bytes = out.len(), "bulletin trimmed");
        Ok(out)
    }
}
