//! Facility lookup and geocoding.

pub mod service;

use arogya_types::error::UpstreamError;
use arogya_types::places::{GeoPoint, Hospital};

/// Text search over a places directory.
pub trait PlaceSearch: Send + Sync {
    /// Run a free-text query and reshape every result to a `Hospital`.
    ///
    /// A response without a result list yields an empty vector.
    fn text_search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Hospital>, UpstreamError>> + Send;
}

/// Forward geocoding of a free-text address.
pub trait Geocoder: Send + Sync {
    /// Coordinates of the first match, or `None` when nothing matches.
    fn geocode(
        &self,
        address: &str,
    ) -> impl std::future::Future<Output = Result<Option<GeoPoint>, UpstreamError>> + Send;
}

/// Query sent to the places directory for a diagnosed disease.
pub fn hospital_query(disease: &str, location: &str) -> String {
    format!("{disease} specialist hospital near {location}")
}
