//! Infrastructure layer for Arogya.
//!
//! Contains implementations of the ports defined in `arogya-core`: SQLite
//! chat storage, the Groq chat provider, the Gemini document model, Google
//! Maps/search clients, the Event Registry news client, GCS object storage
//! and the outbreak bulletin scraper. Also loads configuration and API keys.

pub mod bulletin;
pub mod config;
pub mod gemini;
pub mod google;
pub mod llm;
pub mod news;
pub mod secret;
pub mod sqlite;
pub mod storage;
