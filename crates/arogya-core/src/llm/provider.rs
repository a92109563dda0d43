//! LlmProvider trait definition.
//!
//! This is the core abstraction the chat-completion backend implements.
//! Uses RPITIT for `complete` so implementations can be plain `async fn`.

use arogya_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends (Groq, or any OpenAI-compatible API).
///
/// Implementations live in arogya-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq").
    fn name(&self) -> &str;

    /// Model used when a request leaves `model` empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
