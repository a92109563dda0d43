//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](arogya_core::llm::provider::LlmProvider)
//! used for triage and disease extraction: an OpenAI-compatible client
//! pointed at Groq.

pub mod openai_compat;

use secrecy::SecretString;

use arogya_types::config::ChatConfig;
use arogya_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::groq_config;

/// Build the chat provider from the `[chat]` config section.
///
/// A missing key yields an unconfigured provider rather than an error so the
/// server can still start and answer the routes that do not need it.
pub fn create_chat_provider(
    chat: &ChatConfig,
    api_key: Option<SecretString>,
) -> Result<OpenAiCompatibleProvider, LlmError> {
    if api_key.is_none() {
        tracing::warn!("GROQ_API_KEY not set; chat and hospital search will return 503");
    }
    OpenAiCompatibleProvider::new(groq_config(chat, api_key))
}
