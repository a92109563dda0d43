//! Outbreak record → map marker conversion.

use arogya_types::outbreak::{MapMarker, OutbreakRecord};

use crate::places::Geocoder;

/// Marker shaping parameters.
#[derive(Debug, Clone)]
pub struct MarkerSettings {
    pub radius_per_case: u64,
    /// Appended to district names before geocoding.
    pub region: String,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            radius_per_case: 5,
            region: "India".to_string(),
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// Geocode each record and build its marker.
///
/// Records with a missing or blank district or disease are skipped, as are districts that
/// fail to geocode or have no match. Geocoding runs sequentially.
pub async fn to_markers<G: Geocoder>(
    geocoder: &G,
    records: &[OutbreakRecord],
    settings: &MarkerSettings,
) -> Vec<MapMarker> {
    let mut markers = Vec::with_capacity(records.len());
    for record in records {
        let (Some(district), Some(disease)) = (present(&record.district), present(&record.disease))
        else {
            tracing::debug!(?record, "skipping incomplete outbreak record");
            continue;
        };

        let address = format!("{district}, {}", settings.region);
        match geocoder.geocode(&address).await {
            Ok(Some(point)) => markers.push(MapMarker {
                center: [point.lat, point.lng],
                radius: record.cases.saturating_mul(settings.radius_per_case),
                name: format!("{disease} Outbreak"),
                cases: record.cases,
            }),
            Ok(None) => tracing::warn!(district, "no geocoding result; skipping"),
            Err(e) => tracing::warn!(district, error = %e, "geocoding failed; skipping"),
        }
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGeocoder;

    fn record(district: Option<&str>, disease: Option<&str>, cases: u64) -> OutbreakRecord {
        OutbreakRecord {
            district: district.map(String::from),
            disease: disease.map(String::from),
            cases,
        }
    }

    #[tokio::test]
    async fn test_markers_use_radius_per_case() {
        let geocoder = FakeGeocoder::default().with("Thrissur, India", 10.52, 76.21);
        let markers = to_markers(
            &geocoder,
            &[record(Some("Thrissur"), Some("Food Poisoning"), 107)],
            &MarkerSettings::default(),
        )
        .await;
        assert_eq!(
            markers,
            vec![MapMarker {
                center: [10.52, 76.21],
                radius: 535,
                name: "Food Poisoning Outbreak".to_string(),
                cases: 107,
            }]
        );
    }

    #[tokio::test]
    async fn test_ungeocodable_and_incomplete_records_are_skipped() {
        let geocoder = FakeGeocoder::default()
            .with("Vizianagaram, India", 18.11, 83.39)
            .failing_on("Nowhere, India");
        let records = [
            record(Some("Nowhere"), Some("Cholera"), 3),
            record(Some("Atlantis"), Some("Cholera"), 3),
            record(None, Some("Measles"), 4),
            record(Some("Vizianagaram"), None, 4),
            record(Some(""), Some(""), 4),
            record(Some("  "), Some("Dengue"), 6),
            record(Some("Vizianagaram"), Some(" "), 2),
            record(Some("Vizianagaram"), Some("Acute Diarrheal Disease"), 15),
        ];
        let markers = to_markers(&geocoder, &records, &MarkerSettings::default()).await;
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].radius, 75);
        assert_eq!(
            geocoder.lookups(),
            vec!["Nowhere, India", "Atlantis, India", "Vizianagaram, India"]
        );
    }
}
