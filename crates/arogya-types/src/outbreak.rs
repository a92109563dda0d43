//! Outbreak bulletin extraction and map marker types.

use serde::{Deserialize, Deserializer, Serialize};

/// One outbreak as extracted from a bulletin by the multimodal model.
///
/// Fields are optional because the model output is not schema-enforced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutbreakRecord {
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default, deserialize_with = "lenient_cases")]
    pub cases: u64,
}

/// Top-level shape the model is prompted to return.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutbreakExtraction {
    #[serde(default)]
    pub outbreaks: Vec<OutbreakRecord>,
}

/// A fixed-radius circle on the outbreak map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// `[lat, lng]`
    pub center: [f64; 2],
    pub radius: u64,
    pub name: String,
    pub cases: u64,
}

/// Map payload returned to clients.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutbreakMap {
    pub outbreaks: Vec<MapMarker>,
}

/// Accept `15`, `15.0` or `"15"`; anything else counts as zero.
fn lenient_cases<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().replace(',', "").parse().unwrap_or(0),
        _ => 0,
    })
}
