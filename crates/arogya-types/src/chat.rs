//! Chat session and diagnosed-disease types for Arogya.
//!
//! A chat session is keyed by an opaque caller-supplied `hid` and stores its
//! conversation as a map from user utterance to bot reply. Diagnosed diseases
//! hang off a session and accumulate without consolidation.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel returned when no disease could be extracted from model output.
pub const UNKNOWN_DISEASE: &str = "Unknown";

/// Utterance → reply map in first-insertion order.
///
/// Re-asking an identical utterance replaces the stored reply but keeps the
/// turn at its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation(IndexMap<String, String>);

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a turn, overwriting any earlier reply to the same utterance.
    pub fn record(&mut self, utterance: impl Into<String>, reply: impl Into<String>) {
        self.0.insert(utterance.into(), reply.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn turns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(q, r)| (q.as_str(), r.as_str()))
    }

    /// Render as `User: ...\nBot: ...` blocks joined by newlines.
    pub fn render_history(&self) -> String {
        self.turns()
            .map(|(q, r)| format!("User: {q}\nBot: {r}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All bot replies joined by newlines.
    pub fn replies(&self) -> String {
        self.0.values().map(String::as_str).collect::<Vec<_>>().join("\n")
    }

    /// Short preview of the serialized conversation for listings.
    pub fn preview(&self, max_chars: usize) -> String {
        let full = serde_json::to_string(&self.0).unwrap_or_default();
        if full.chars().count() > max_chars {
            let head: String = full.chars().take(max_chars).collect();
            format!("{head}...")
        } else {
            full
        }
    }
}

/// A chat session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    pub id: Uuid,
    pub hid: String,
    pub conversation: Conversation,
}

impl ChatHistory {
    /// A fresh, empty session for the given hid.
    pub fn new(hid: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            hid: hid.into(),
            conversation: Conversation::new(),
        }
    }
}

/// A disease diagnosed for a chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosedDisease {
    pub id: Uuid,
    pub history_id: Uuid,
    pub disease: String,
    pub created_at: DateTime<Utc>,
}

/// Diagnosed disease joined with its session hid, for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosedDiseaseView {
    pub hid: String,
    pub disease: String,
    pub created_at: DateTime<Utc>,
}
