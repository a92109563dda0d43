//! Hospital search for a session's diagnosed disease.

use std::sync::Arc;

use arogya_types::chat::UNKNOWN_DISEASE;
use arogya_types::error::ServiceError;
use arogya_types::places::HospitalSearch;

use crate::chat::extractor::extract_disease;
use crate::chat::repository::ChatRepository;
use crate::llm::provider::LlmProvider;
use crate::places::{PlaceSearch, hospital_query};

pub struct HospitalService<R: ChatRepository, P: LlmProvider, S: PlaceSearch> {
    repo: R,
    provider: Arc<P>,
    places: S,
}

impl<R: ChatRepository, P: LlmProvider, S: PlaceSearch> HospitalService<R, P, S> {
    pub fn new(repo: R, provider: Arc<P>, places: S) -> Self {
        Self {
            repo,
            provider,
            places,
        }
    }

    /// Extract the disease from the session's replies and look up matching
    /// hospitals near `location`.
    ///
    /// The extracted disease is recorded against the session so that content
    /// recommendations can find it later.
    #[tracing::instrument(name = "find_hospitals", skip(self), fields(hid = %hid))]
    pub async fn find(&self, hid: &str, location: &str) -> Result<HospitalSearch, ServiceError> {
        let history = self.repo.get(hid).await?.ok_or_else(|| {
            ServiceError::NotFound("Chat history not found for the given HID.".to_string())
        })?;

        let disease = extract_disease(self.provider.as_ref(), &history.conversation.replies()).await?;
        if disease == UNKNOWN_DISEASE {
            return Err(ServiceError::DiseaseUnknown);
        }

        self.repo.add_disease(hid, &disease).await?;

        let hospitals = self
            .places
            .text_search(&hospital_query(&disease, location))
            .await?;
        tracing::info!(disease = %disease, count = hospitals.len(), "hospital search complete");

        Ok(HospitalSearch {
            disease,
            location: location.to_string(),
            hospitals,
        })
    }
}
