//! ChatRepository trait definition.
//!
//! Persistence for chat sessions (keyed by `hid`) and the diseases
//! diagnosed for them. Implementations live in arogya-infra
//! (e.g., `SqliteChatRepository`).

use arogya_types::chat::{ChatHistory, DiagnosedDisease, DiagnosedDiseaseView};
use arogya_types::error::RepositoryError;

/// Repository trait for chat session and diagnosed-disease persistence.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Fetch the session for `hid`, creating an empty one on first use.
    fn get_or_create(
        &self,
        hid: &str,
    ) -> impl std::future::Future<Output = Result<ChatHistory, RepositoryError>> + Send;

    /// Fetch the session for `hid`, if any.
    fn get(
        &self,
        hid: &str,
    ) -> impl std::future::Future<Output = Result<Option<ChatHistory>, RepositoryError>> + Send;

    /// Store `utterance -> reply` in the session's conversation.
    ///
    /// Creates the session if needed. An identical utterance overwrites the
    /// earlier reply.
    fn record_turn(
        &self,
        hid: &str,
        utterance: &str,
        reply: &str,
    ) -> impl std::future::Future<Output = Result<ChatHistory, RepositoryError>> + Send;

    /// List sessions, oldest first.
    fn list(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<ChatHistory>, RepositoryError>> + Send;

    /// Delete a session and, by cascade, its diagnosed diseases.
    fn delete(
        &self,
        hid: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Record a diagnosed disease for an existing session.
    fn add_disease(
        &self,
        hid: &str,
        disease: &str,
    ) -> impl std::future::Future<Output = Result<DiagnosedDisease, RepositoryError>> + Send;

    /// The most recently diagnosed disease for a session.
    fn latest_disease(
        &self,
        hid: &str,
    ) -> impl std::future::Future<Output = Result<Option<DiagnosedDisease>, RepositoryError>> + Send;

    /// List diagnosed diseases across sessions, newest first.
    fn list_diseases(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<DiagnosedDiseaseView>, RepositoryError>> + Send;
}
