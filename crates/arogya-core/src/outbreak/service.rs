//! Bulletin → outbreak map orchestration.

use arogya_types::error::OutbreakError;
use arogya_types::outbreak::OutbreakMap;
use arogya_types::report::Document;

use crate::document::{DocumentModel, GenerationRequest, upload_and_generate};
use crate::outbreak::markers::{MarkerSettings, to_markers};
use crate::outbreak::{BulletinSource, OUTBREAK_PROMPT, PageTrimmer, parse_outbreaks};
use crate::places::Geocoder;

pub struct OutbreakService<B, T, M, G>
where
    B: BulletinSource,
    T: PageTrimmer,
    M: DocumentModel,
    G: Geocoder,
{
    source: B,
    trimmer: T,
    model: M,
    geocoder: G,
    header_pages: u32,
    markers: MarkerSettings,
}

impl<B, T, M, G> OutbreakService<B, T, M, G>
where
    B: BulletinSource,
    T: PageTrimmer,
    M: DocumentModel,
    G: Geocoder,
{
    pub fn new(
        source: B,
        trimmer: T,
        model: M,
        geocoder: G,
        header_pages: u32,
        markers: MarkerSettings,
    ) -> Self {
        Self {
            source,
            trimmer,
            model,
            geocoder,
            header_pages,
            markers,
        }
    }

    #[tracing::instrument(name = "outbreak_map", skip(self))]
    pub async fn outbreaks(&self, year: i32, week: u32) -> Result<OutbreakMap, OutbreakError> {
        let url = self.source.locate(year, week).await?;
        tracing::info!(url = %url, "bulletin located");

        let pdf = self.source.download(&url).await?;
        let trimmed = self.trimmer.drop_leading_pages(&pdf, self.header_pages)?;

        let document = Document::new(
            format!("bulletin_{year}_{week}.pdf"),
            "application/pdf",
            trimmed,
        );
        let request = GenerationRequest {
            prompt: OUTBREAK_PROMPT.to_string(),
            system_instruction: None,
            response_mime_type: Some("application/json".to_string()),
        };
        let text = upload_and_generate(&self.model, &document, &request).await?;
        let extraction = parse_outbreaks(&text)?;

        let outbreaks = to_markers(&self.geocoder, &extraction.outbreaks, &self.markers).await;
        tracing::info!(
            extracted = extraction.outbreaks.len(),
            mapped = outbreaks.len(),
            "outbreak map built"
        );
        Ok(OutbreakMap { outbreaks })
    }
}
