//! Configuration for the OpenAI-compatible chat provider.

use std::time::Duration;

use secrecy::SecretString;

use arogya_types::config::ChatConfig;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "groq").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.groq.com/openai/v1").
    pub base_url: String,
    /// `None` leaves the provider unconfigured; every call then fails fast.
    pub api_key: Option<SecretString>,
    /// Model used when a request leaves `model` empty.
    pub model: String,
    pub timeout: Duration,
}

/// Groq configuration from the `[chat]` config section.
pub fn groq_config(chat: &ChatConfig, api_key: Option<SecretString>) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "groq".into(),
        base_url: chat.base_url.clone(),
        api_key,
        model: chat.model.clone(),
        timeout: Duration::from_secs(chat.timeout_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_config_from_defaults() {
        let config = groq_config(&ChatConfig::default(), None);
        assert_eq!(config.provider_name, "groq");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.api_key.is_none());
    }
}
