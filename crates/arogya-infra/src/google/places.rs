//! Places Text Search and Geocoding.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use arogya_core::places::{Geocoder, PlaceSearch};
use arogya_types::error::UpstreamError;
use arogya_types::places::{GeoPoint, Hospital, Rating};

use super::get_json;

const PLACES: &str = "places";
const GEOCODING: &str = "geocoding";

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    results: Option<Vec<PlaceResult>>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    rating: Option<f64>,
}

impl From<PlaceResult> for Hospital {
    fn from(place: PlaceResult) -> Self {
        Hospital {
            name: place.name,
            address: place.formatted_address,
            rating: Rating::from(place.rating),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: GeoPoint,
}

/// Client for the Maps web services sharing one API key.
pub struct PlacesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl PlacesClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn key(&self, service: &str) -> Result<&str, UpstreamError> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .ok_or_else(|| UpstreamError::NotConfigured(service.to_string()))
    }
}

impl PlaceSearch for PlacesClient {
    async fn text_search(&self, query: &str) -> Result<Vec<Hospital>, UpstreamError> {
        let key = self.key(PLACES)?;
        let request = self
            .client
            .get(format!("{}/maps/api/place/textsearch/json", self.base_url))
            .query(&[("query", query), ("key", key)]);

        let response: TextSearchResponse = get_json(request, PLACES).await?;
        Ok(response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Hospital::from)
            .collect())
    }
}

impl Geocoder for PlacesClient {
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, UpstreamError> {
        let key = self.key(GEOCODING)?;
        let request = self
            .client
            .get(format!("{}/maps/api/geocode/json", self.base_url))
            .query(&[("address", address), ("key", key)]);

        let response: GeocodeResponse = get_json(request, GEOCODING).await?;
        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" | "" => {}
            status => {
                return Err(UpstreamError::decode(
                    GEOCODING,
                    format!(
                        "status {status}: {}",
                        response.error_message.unwrap_or_default()
                    ),
                ));
            }
        }
        Ok(response.results.into_iter().next().map(|r| r.geometry.location))
    }
}
