//! SQLite connection pools for the session database.
//!
//! Writes go through a single connection so `record_turn`'s
//! read-modify-write on a conversation is serialized; reads use a separate
//! read-only pool. The file runs in WAL mode with foreign keys on, which
//! `diagnosed_diseases` relies on for its cascade delete.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

const READER_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    /// Exactly one connection.
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open (creating if needed) the database and apply pending migrations.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;
        // The reader pool opens read-only, so the schema must exist first.
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        Ok(Self { reader, writer })
    }
}

/// Database URL for `arogya.db` inside the data directory.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}/arogya.db", data_dir.display())
}
