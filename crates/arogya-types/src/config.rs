//! Global configuration types for Arogya.
//!
//! `GlobalConfig` represents the `config.toml` in the data directory. It holds
//! upstream endpoints, model names and tunables; API keys never live here
//! (they come from the environment). Every field has a default.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub gemini: GeminiConfig,
    pub google: GoogleConfig,
    pub news: NewsConfig,
    pub outbreak: OutbreakConfig,
    pub storage: StorageConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Upload body limit in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Conversational model (OpenAI-compatible chat completions).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.0,
            max_tokens: 500,
            timeout_secs: 10,
        }
    }
}

/// Multimodal document model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.1,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            timeout_secs: 300,
        }
    }
}

/// Google Maps and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub maps_base_url: String,
    pub youtube_base_url: String,
    pub custom_search_base_url: String,
    pub max_results: u32,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            maps_base_url: "https://maps.googleapis.com".to_string(),
            youtube_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            custom_search_base_url: "https://www.googleapis.com/customsearch/v1".to_string(),
            max_results: 5,
        }
    }
}

/// News aggregator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub base_url: String,
    pub max_items: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://eventregistry.org".to_string(),
            max_items: 500,
        }
    }
}

/// Outbreak bulletin pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutbreakConfig {
    pub bulletin_index_url: String,
    /// Leading pages (cover, index) dropped before model extraction.
    pub header_pages: u32,
    pub radius_per_case: u64,
    /// Appended to each district name before geocoding.
    pub geocode_region: String,
    /// The bulletin host serves an incomplete certificate chain.
    pub accept_invalid_certs: bool,
}

impl Default for OutbreakConfig {
    fn default() -> Self {
        Self {
            bulletin_index_url:
                "https://idsp.mohfw.gov.in/index4.php?lang=1&level=0&linkid=406&lid=3689"
                    .to_string(),
            header_pages: 2,
            radius_per_case: 5,
            geocode_region: "India".to_string(),
            accept_invalid_certs: true,
        }
    }
}

/// Object storage for uploaded reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub base_url: String,
    pub signed_url_ttl_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://storage.googleapis.com".to_string(),
            signed_url_ttl_secs: 7 * 24 * 60 * 60,
        }
    }
}
