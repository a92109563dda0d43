//! Environment variable secret provider.
//!
//! Reads every upstream credential once at startup. Empty values are treated
//! as unset.

use std::path::PathBuf;

use secrecy::SecretString;

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const GOOGLE_PLACES_API_KEY: &str = "GOOGLE_PLACES_API_KEY";
/// Also used for the custom search API.
pub const YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
pub const SEARCH_ENGINE_ID: &str = "SEARCH_ENGINE_ID";
pub const EVENT_REGISTRY_API_KEY: &str = "EVENT_REGISTRY_API_KEY";
pub const BUCKET_NAME: &str = "BUCKET_NAME";
pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Upstream credentials resolved from the environment.
#[derive(Debug, Default)]
pub struct EnvSecrets {
    pub groq_api_key: Option<SecretString>,
    pub gemini_api_key: Option<SecretString>,
    pub google_places_api_key: Option<SecretString>,
    pub youtube_api_key: Option<SecretString>,
    pub search_engine_id: Option<String>,
    pub event_registry_api_key: Option<SecretString>,
    pub bucket_name: Option<String>,
    /// Path to a service-account JSON key file.
    pub google_credentials: Option<PathBuf>,
}

impl EnvSecrets {
    /// Read all credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve credentials through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let secret = |key: &str| get(key).map(SecretString::from);

        let secrets = Self {
            groq_api_key: secret(GROQ_API_KEY),
            gemini_api_key: secret(GEMINI_API_KEY),
            google_places_api_key: secret(GOOGLE_PLACES_API_KEY),
            youtube_api_key: secret(YOUTUBE_API_KEY),
            search_engine_id: get(SEARCH_ENGINE_ID),
            event_registry_api_key: secret(EVENT_REGISTRY_API_KEY),
            bucket_name: get(BUCKET_NAME),
            google_credentials: get(GOOGLE_APPLICATION_CREDENTIALS).map(PathBuf::from),
        };
        secrets.log_missing();
        secrets
    }

    fn log_missing(&self) {
        let missing: Vec<&str> = [
            (GROQ_API_KEY, self.groq_api_key.is_some()),
            (GEMINI_API_KEY, self.gemini_api_key.is_some()),
            (GOOGLE_PLACES_API_KEY, self.google_places_api_key.is_some()),
            (YOUTUBE_API_KEY, self.youtube_api_key.is_some()),
            (SEARCH_ENGINE_ID, self.search_engine_id.is_some()),
            (EVENT_REGISTRY_API_KEY, self.event_registry_api_key.is_some()),
            (BUCKET_NAME, self.bucket_name.is_some()),
            (GOOGLE_APPLICATION_CREDENTIALS, self.google_credentials.is_some()),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(key, _)| key)
        .collect();

        if !missing.is_empty() {
            tracing::warn!(?missing, "some upstream credentials are not set");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    #[test]
    fn test_lookup_reads_known_keys() {
        let env: HashMap<&str, &str> = HashMap::from([
            (GROQ_API_KEY, "gsk-123"),
            (SEARCH_ENGINE_ID, "cx-1"),
            (GOOGLE_APPLICATION_CREDENTIALS, "/etc/arogya/sa.json"),
        ]);
        let secrets = EnvSecrets::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(secrets.groq_api_key.unwrap().expose_secret(), "gsk-123");
        assert_eq!(secrets.search_engine_id.as_deref(), Some("cx-1"));
        assert_eq!(
            secrets.google_credentials,
            Some(PathBuf::from("/etc/arogya/sa.json"))
        );
        assert!(secrets.gemini_api_key.is_none());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let secrets = EnvSecrets::from_lookup(|k| (k == BUCKET_NAME).then(|| "  ".to_string()));
        assert!(secrets.bucket_name.is_none());
    }

    #[test]
    fn test_debug_does_not_leak_keys() {
        let secrets =
            EnvSecrets::from_lookup(|k| (k == GEMINI_API_KEY).then(|| "AIza-secret".to_string()));
        assert!(!format!("{secrets:?}").contains("AIza-secret"));
    }
}
