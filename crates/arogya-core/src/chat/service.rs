//! Triage service: one conversational turn per call.
//!
//! Loads (or creates) the session, renders its history into the prompt,
//! calls the model and persists the new turn. The reply is returned verbatim;
//! the JSON shape the prompt asks for is not validated.

use std::sync::Arc;

use arogya_types::error::ServiceError;

use crate::chat::prompt::{TriageSettings, build_triage_request};
use crate::chat::repository::ChatRepository;
use crate::llm::instrumented_complete;
use crate::llm::provider::LlmProvider;

/// Generic over the repository and the provider so arogya-core never
/// depends on arogya-infra.
pub struct TriageService<R: ChatRepository, P: LlmProvider> {
    repo: R,
    provider: Arc<P>,
    settings: TriageSettings,
}

impl<R: ChatRepository, P: LlmProvider> TriageService<R, P> {
    pub fn new(repo: R, provider: Arc<P>, settings: TriageSettings) -> Self {
        Self {
            repo,
            provider,
            settings,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Answer `utterance` in the context of session `hid`.
    #[tracing::instrument(name = "triage_turn", skip(self, utterance), fields(hid = %hid))]
    pub async fn respond(&self, hid: &str, utterance: &str) -> Result<String, ServiceError> {
        let history = self.repo.get_or_create(hid).await?;
        let request = build_triage_request(&history.conversation, utterance, self.settings);

        let response =
            instrumented_complete(self.provider.as_ref(), "triage", &request).await?;
        let reply = response.content;

        let updated = self.repo.record_turn(hid, utterance, &reply).await?;
        tracing::info!(turns = updated.conversation.len(), "recorded triage turn");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeProvider, MemoryChatRepository};

    fn service(provider: FakeProvider) -> TriageService<MemoryChatRepository, FakeProvider> {
        TriageService::new(
            MemoryChatRepository::default(),
            Arc::new(provider),
            TriageSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_respond_persists_turn() {
        let svc = service(FakeProvider::replying(["How many days?"]));
        let reply = svc.respond("h1", "I have a fever").await.unwrap();
        assert_eq!(reply, "How many days?");

        let stored = svc.repo().get("h1").await.unwrap().unwrap();
        let turns: Vec<_> = stored.conversation.turns().collect();
        assert_eq!(turns, vec![("I have a fever", "How many days?")]);
    }

    #[tokio::test]
    async fn test_second_turn_sees_history() {
        let provider = FakeProvider::replying(["How many days?", "Any rash?"]);
        let svc = service(provider);
        svc.respond("h1", "I have a fever").await.unwrap();
        svc.respond("h1", "Three days").await.unwrap();

        let requests = svc.provider.requests();
        assert_eq!(
            requests[1].messages[0].content,
            "User: I have a fever\nBot: How many days?\nUser: Three days"
        );
    }

    #[tokio::test]
    async fn test_repeated_utterance_overwrites_reply() {
        let svc = service(FakeProvider::replying(["first", "second"]));
        svc.respond("h1", "fever").await.unwrap();
        svc.respond("h1", "fever").await.unwrap();

        let stored = svc.repo().get("h1").await.unwrap().unwrap();
        assert_eq!(stored.conversation.len(), 1);
        assert_eq!(stored.conversation.replies(), "second");
    }

    #[tokio::test]
    async fn test_provider_failure_records_nothing() {
        let svc = service(FakeProvider::failing());
        let err = svc.respond("h1", "fever").await.unwrap_err();
        assert!(matches!(err, ServiceError::Llm(_)));

        let stored = svc.repo().get("h1").await.unwrap().unwrap();
        assert!(stored.conversation.is_empty());
    }
}
