//! Google Maps Platform and search API clients.
//!
//! - [`places::PlacesClient`]: Places Text Search and the Geocoding API
//! - [`youtube::YouTubeClient`]: YouTube Data API v3 search
//! - [`custom_search::CustomSearchClient`]: Custom Search JSON API

pub mod custom_search;
pub mod places;
pub mod youtube;

use serde::de::DeserializeOwned;

use arogya_types::error::UpstreamError;

/// Send a GET request and decode its JSON body.
///
/// Non-2xx responses map to [`UpstreamError::Status`] before the body is read.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    service: &str,
) -> Result<T, UpstreamError> {
    let response = request
        .send()
        .await
        .map_err(|e| UpstreamError::transport(service, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status {
            service: service.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| UpstreamError::decode(service, e))
}
