//! Triage prompt assembly.

use arogya_types::chat::Conversation;
use arogya_types::llm::{CompletionRequest, Message};

/// System prompt for the conversational triage model.
pub const TRIAGE_SYSTEM_PROMPT: &str = r#"You are a conversational medical chatbot. Gather sufficient information by asking follow-up questions before providing a diagnosis. Ask 3-4 relevant follow-up questions based on the user's symptoms to ensure you have enough information to provide a helpful assessment.

Examples of good follow-up questions:
- If the user mentions fever: 'How many days have you had a fever? Is it accompanied by other symptoms?'
- If the user reports chest pain: 'Do you also feel shortness of breath or dizziness? Where exactly is the pain located?'
- If the user has a headache: 'Is it a throbbing pain or more like pressure? Does light or sound make it worse?'
- If the user mentions stomach pain: 'Is the pain constant or intermittent? Have you noticed any triggers like certain foods?'

After gathering sufficient information (3-4 exchanges), provide your final response strictly in the following JSON format only, with no extra text:

{
  "symptoms": "[List user's reported symptoms]",
  "potential_cause": "[List possible causes based on symptoms]",
  "recommended_remedy": "[Provide appropriate self-care advice or recommend professional care]",
  "consultation_advice": "[Indicate whether the condition likely requires medical attention or can be managed at home]"
}"#;

/// Sampling settings for a triage turn.
#[derive(Debug, Clone, Copy)]
pub struct TriageSettings {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for TriageSettings {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 500,
        }
    }
}

/// The single user message: rendered history followed by the new utterance.
pub fn triage_user_message(history: &Conversation, utterance: &str) -> String {
    format!("{}\nUser: {utterance}", history.render_history())
}

/// Build the completion request for one triage turn.
pub fn build_triage_request(
    history: &Conversation,
    utterance: &str,
    settings: TriageSettings,
) -> CompletionRequest {
    CompletionRequest {
        model: String::new(),
        messages: vec![Message::user(triage_user_message(history, utterance))],
        system: Some(TRIAGE_SYSTEM_PROMPT.to_string()),
        max_tokens: settings.max_tokens,
        temperature: Some(settings.temperature),
    }
}
