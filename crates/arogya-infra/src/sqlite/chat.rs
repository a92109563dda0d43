//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `arogya-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reads on the reader
//! pool and every mutation on the single-connection writer.

use arogya_core::chat::repository::ChatRepository;
use arogya_types::chat::{ChatHistory, Conversation, DiagnosedDisease, DiagnosedDiseaseView};
use arogya_types::error::RepositoryError;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatHistoryRow {
    id: String,
    hid: String,
    conversation: String,
}

impl ChatHistoryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            hid: row.try_get("hid")?,
            conversation: row.try_get("conversation")?,
        })
    }

    fn into_history(self) -> Result<ChatHistory, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid history id: {e}")))?;
        let conversation: Conversation = serde_json::from_str(&self.conversation)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation JSON: {e}")))?;

        Ok(ChatHistory {
            id,
            hid: self.hid,
            conversation,
        })
    }
}

struct DiagnosedDiseaseRow {
    id: String,
    history_id: String,
    disease: String,
    created_at: String,
}

impl DiagnosedDiseaseRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            history_id: row.try_get("history_id")?,
            disease: row.try_get("disease")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_disease(self) -> Result<DiagnosedDisease, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid disease id: {e}")))?;
        let history_id = Uuid::parse_str(&self.history_id)
            .map_err(|e| RepositoryError::Query(format!("invalid history_id: {e}")))?;

        Ok(DiagnosedDisease {
            id,
            history_id,
            disease: self.disease,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width so that text ordering matches time ordering.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn encode_conversation(conversation: &Conversation) -> Result<String, RepositoryError> {
    serde_json::to_string(conversation)
        .map_err(|e| RepositoryError::Query(format!("failed to encode conversation: {e}")))
}

const HISTORY_COLUMNS: &str = "id, hid, conversation";

impl ChatRepository for SqliteChatRepository {
    async fn get_or_create(&self, hid: &str) -> Result<ChatHistory, RepositoryError> {
        let fresh = ChatHistory::new(hid);
        sqlx::query(
            "INSERT INTO chat_histories (id, hid, conversation, created_at) VALUES (?, ?, '{}', ?)
             ON CONFLICT(hid) DO NOTHING",
        )
        .bind(fresh.id.to_string())
        .bind(hid)
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Read back on the writer so a concurrent insert by another request is seen.
        let row = sqlx::query(&format!(
            "SELECT {HISTORY_COLUMNS} FROM chat_histories WHERE hid = ?"
        ))
        .bind(hid)
        .fetch_one(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        ChatHistoryRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_history()
    }

    async fn get(&self, hid: &str) -> Result<Option<ChatHistory>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {HISTORY_COLUMNS} FROM chat_histories WHERE hid = ?"
        ))
        .bind(hid)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let history_row = ChatHistoryRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(history_row.into_history()?))
            }
            None => Ok(None),
        }
    }

    async fn record_turn(
        &self,
        hid: &str,
        utterance: &str,
        reply: &str,
    ) -> Result<ChatHistory, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let row = sqlx::query(&format!(
            "SELECT {HISTORY_COLUMNS} FROM chat_histories WHERE hid = ?"
        ))
        .bind(hid)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut history = match row {
            Some(row) => ChatHistoryRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_history()?,
            None => {
                let created = ChatHistory::new(hid);
                sqlx::query(
                    "INSERT INTO chat_histories (id, hid, conversation, created_at) VALUES (?, ?, '{}', ?)",
                )
                .bind(created.id.to_string())
                .bind(hid)
                .bind(format_datetime(&Utc::now()))
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
                created
            }
        };

        history.conversation.record(utterance, reply);

        sqlx::query("UPDATE chat_histories SET conversation = ? WHERE id = ?")
            .bind(encode_conversation(&history.conversation)?)
            .bind(history.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(history)
    }

    async fn list(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ChatHistory>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {HISTORY_COLUMNS} FROM chat_histories ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?"
        ))
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                ChatHistoryRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_history()
            })
            .collect()
    }

    async fn delete(&self, hid: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_histories WHERE hid = ?")
            .bind(hid)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn add_disease(
        &self,
        hid: &str,
        disease: &str,
    ) -> Result<DiagnosedDisease, RepositoryError> {
        let history_id: Option<(String,)> =
            sqlx::query_as("SELECT id FROM chat_histories WHERE hid = ?")
                .bind(hid)
                .fetch_optional(&self.pool.writer)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let (history_id,) = history_id.ok_or(RepositoryError::NotFound)?;
        let history_id = Uuid::parse_str(&history_id)
            .map_err(|e| RepositoryError::Query(format!("invalid history id: {e}")))?;

        let entry = DiagnosedDisease {
            id: Uuid::now_v7(),
            history_id,
            disease: disease.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO diagnosed_diseases (id, history_id, disease, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(entry.history_id.to_string())
        .bind(&entry.disease)
        .bind(format_datetime(&entry.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(entry)
    }

    async fn latest_disease(&self, hid: &str) -> Result<Option<DiagnosedDisease>, RepositoryError> {
        let row = sqlx::query(
            "SELECT d.id, d.history_id, d.disease, d.created_at
             FROM diagnosed_diseases d
             JOIN chat_histories h ON h.id = d.history_id
             WHERE h.hid = ?
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT 1",
        )
        .bind(hid)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let disease_row = DiagnosedDiseaseRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(disease_row.into_disease()?))
            }
            None => Ok(None),
        }
    }

    async fn list_diseases(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<DiagnosedDiseaseView>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT h.hid, d.disease, d.created_at
             FROM diagnosed_diseases d
             JOIN chat_histories h ON h.id = d.history_id
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let hid: String = row
                    .try_get("hid")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let disease: String = row
                    .try_get("disease")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let created_at: String = row
                    .try_get("created_at")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(DiagnosedDiseaseView {
                    hid,
                    disease,
                    created_at: parse_datetime(&created_at)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let repo = SqliteChatRepository::new(test_pool().await);
        let first = repo.get_or_create("h1").await.unwrap();
        let second = repo.get_or_create("h1").await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(second.conversation.is_empty());
        assert!(repo.get("h2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_turn_creates_and_appends() {
        let repo = SqliteChatRepository::new(test_pool().await);
        repo.record_turn("h1", "I have a fever", "How many days?")
            .await
            .unwrap();
        repo.record_turn("h1", "Three days", "Any chills?").await.unwrap();

        let stored = repo.get("h1").await.unwrap().unwrap();
        assert_eq!(
            stored.conversation.render_history(),
            "User: I have a fever\nBot: How many days?\nUser: Three days\nBot: Any chills?"
        );
    }

    #[tokio::test]
    async fn test_identical_utterance_overwrites_reply() {
        let repo = SqliteChatRepository::new(test_pool().await);
        repo.record_turn("h1", "fever", "first").await.unwrap();
        repo.record_turn("h1", "cough", "second").await.unwrap();
        repo.record_turn("h1", "fever", "third").await.unwrap();

        let stored = repo.get("h1").await.unwrap().unwrap();
        let turns: Vec<_> = stored.conversation.turns().collect();
        assert_eq!(turns, vec![("fever", "third"), ("cough", "second")]);
    }

    #[tokio::test]
    async fn test_concurrent_turns_are_not_lost() {
        let repo = SqliteChatRepository::new(test_pool().await);
        repo.get_or_create("h1").await.unwrap();

        let mut handles = Vec::new();
        for i in 0..10 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.record_turn("h1", &format!("q{i}"), &format!("r{i}"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = repo.get("h1").await.unwrap().unwrap();
        assert_eq!(stored.conversation.len(), 10);
    }

    #[tokio::test]
    async fn test_latest_disease_and_listing() {
        let repo = SqliteChatRepository::new(test_pool().await);
        repo.get_or_create("h1").await.unwrap();
        repo.get_or_create("h2").await.unwrap();

        repo.add_disease("h1", "Flu").await.unwrap();
        repo.add_disease("h2", "Asthma").await.unwrap();
        repo.add_disease("h1", "Migraine").await.unwrap();

        let latest = repo.latest_disease("h1").await.unwrap().unwrap();
        assert_eq!(latest.disease, "Migraine");
        assert!(repo.latest_disease("missing").await.unwrap().is_none());

        let all = repo.list_diseases(None, None).await.unwrap();
        let names: Vec<_> = all.iter().map(|d| (d.hid.as_str(), d.disease.as_str())).collect();
        assert_eq!(names, vec![("h1", "Migraine"), ("h2", "Asthma"), ("h1", "Flu")]);

        let page = repo.list_diseases(Some(1), Some(1)).await.unwrap();
        assert_eq!(page[0].disease, "Asthma");
    }

    #[tokio::test]
    async fn test_add_disease_requires_session() {
        let repo = SqliteChatRepository::new(test_pool().await);
        let err = repo.add_disease("missing", "Flu").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_diseases() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        repo.record_turn("h1", "fever", "ok").await.unwrap();
        repo.add_disease("h1", "Flu").await.unwrap();

        repo.delete("h1").await.unwrap();

        assert!(repo.get("h1").await.unwrap().is_none());
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM diagnosed_diseases")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        assert_eq!(count, 0);

        let err = repo.delete("h1").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_sessions_in_creation_order() {
        let repo = SqliteChatRepository::new(test_pool().await);
        for hid in ["a", "b", "c"] {
            repo.get_or_create(hid).await.unwrap();
        }
        let all = repo.list(None, None).await.unwrap();
        let hids: Vec<_> = all.iter().map(|h| h.hid.as_str()).collect();
        assert_eq!(hids, vec!["a", "b", "c"]);

        let limited = repo.list(Some(2), Some(1)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].hid, "b");
    }
}
