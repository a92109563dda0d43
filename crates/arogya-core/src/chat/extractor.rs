//! Disease extraction via a second LLM call.
//!
//! The model is asked to answer `{"disease": "..."}`. Parsing is best-effort:
//! anything that does not yield a non-empty disease string becomes
//! [`UNKNOWN_DISEASE`]. Only provider errors propagate.

use arogya_types::chat::UNKNOWN_DISEASE;
use arogya_types::llm::{CompletionRequest, LlmError, Message};

use crate::llm::instrumented_complete;
use crate::llm::provider::LlmProvider;

const EXTRACTION_MAX_TOKENS: u32 = 500;

fn extraction_prompt(response_text: &str) -> String {
    format!(
        "Given the following medical chatbot response, extract the diagnosed disease or condition.\n\
         If no disease is mentioned, return 'Unknown'.\n\
         Response:\n\
         {response_text}\n\
         Answer in this JSON format:\n\
         {{\"disease\": \"extracted disease\"}}"
    )
}

/// Ask the model which disease `response_text` diagnoses.
#[tracing::instrument(name = "extract_disease", skip_all, fields(text_len = response_text.len()))]
pub async fn extract_disease<P: LlmProvider>(
    provider: &P,
    response_text: &str,
) -> Result<String, LlmError> {
    let request = CompletionRequest {
        model: String::new(),
        messages: vec![Message::user(extraction_prompt(response_text))],
        system: None,
        max_tokens: EXTRACTION_MAX_TOKENS,
        temperature: Some(0.0),
    };

    let response = instrumented_complete(provider, "extract_disease", &request).await?;
    let disease = parse_disease(&response.content);
    if disease == UNKNOWN_DISEASE {
        let preview: String = response.content.chars().take(200).collect();
        tracing::debug!(content_preview = %preview, "no disease in extraction output");
    }
    Ok(disease)
}

/// Pull the `disease` field out of raw model output.
pub fn parse_disease(raw: &str) -> String {
    let body = strip_code_fence(raw.trim());
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse disease extraction JSON; using Unknown");
            return UNKNOWN_DISEASE.to_string();
        }
    };

    match value.get("disease").and_then(|d| d.as_str()).map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => UNKNOWN_DISEASE.to_string(),
    }
}

/// Strip a surrounding Markdown code fence (```json ... ```), if any.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening line.
    match inner.find('\n') {
        Some(idx) => inner[idx + 1..].trim(),
        None => inner.trim(),
    }
}
