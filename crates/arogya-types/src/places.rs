//! Facility lookup and geocoding types.

use serde::{Deserialize, Serialize, Serializer};

/// Rating of a place: the numeric score, or `"No rating"` when absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Rating {
    Score(f64),
    Missing,
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(score) => serializer.serialize_f64(*score),
            Rating::Missing => serializer.serialize_str("No rating"),
        }
    }
}

impl From<Option<f64>> for Rating {
    fn from(value: Option<f64>) -> Self {
        value.map(Rating::Score).unwrap_or(Rating::Missing)
    }
}

/// A hospital returned by a places text search.
#[derive(Debug, Clone, Serialize)]
pub struct Hospital {
    pub name: String,
    pub address: String,
    pub rating: Rating,
}

/// Latitude/longitude pair from a geocoding lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Result of a disease-aware hospital search.
#[derive(Debug, Clone, Serialize)]
pub struct HospitalSearch {
    pub disease: String,
    pub location: String,
    pub hospitals: Vec<Hospital>,
}
