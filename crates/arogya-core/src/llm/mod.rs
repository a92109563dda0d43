//! LLM provider abstractions for Arogya.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `instrumented_complete`: runs a completion inside a GenAI span

pub mod provider;

use tracing::{Instrument, info_span};

use arogya_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use self::provider::LlmProvider;

/// Run `provider.complete` inside a `gen_ai.complete` span and record usage.
pub async fn instrumented_complete<P: LlmProvider>(
    provider: &P,
    operation: &'static str,
    request: &CompletionRequest,
) -> Result<CompletionResponse, LlmError> {
    let model = if request.model.is_empty() {
        provider.model()
    } else {
        request.model.as_str()
    };
    let span = info_span!(
        "gen_ai.complete",
        gen_ai.operation.name = operation,
        gen_ai.provider.name = provider.name(),
        gen_ai.request.model = model,
        gen_ai.request.max_tokens = request.max_tokens,
        gen_ai.request.temperature = ?request.temperature,
        gen_ai.usage.input_tokens = tracing::field::Empty,
        gen_ai.usage.output_tokens = tracing::field::Empty,
    );

    let response = provider.complete(request).instrument(span.clone()).await?;
    span.record("gen_ai.usage.input_tokens", response.usage.input_tokens);
    span.record("gen_ai.usage.output_tokens", response.usage.output_tokens);
    Ok(response)
}
