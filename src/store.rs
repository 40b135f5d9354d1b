use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::RelayError;

/// Durable correlation store mapping forwarded group messages back to the
/// users who sent them.
///
/// Append-only: a row is written once when a forward succeeds and is never
/// updated or deleted, so the history also serves as an audit trail. A
/// single long-lived WAL-mode connection behind a mutex serves concurrent
/// handlers.
#[derive(Clone)]
pub struct CorrelationStore {
    conn: Arc<Mutex<Connection>>,
}

impl CorrelationStore {
    /// Open or create the SQLite database at the given path.
    /// Safe to call on every process start; migrations are idempotent.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        // Enable WAL mode for better concurrent read performance
        // journal_mode PRAGMA always returns the resulting mode, so use query_row
        let _: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;

        Self::run_migrations(&conn)?;

        info!("Correlation store initialized at: {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "
            -- One row per successfully forwarded user message
            CREATE TABLE IF NOT EXISTS relayed_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                message_id INTEGER NOT NULL,
                forwarded_message_id INTEGER NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX IF NOT EXISTS idx_relayed_forwarded
                ON relayed_messages(forwarded_message_id);
            ",
        )?;
        Ok(())
    }

    /// Append one correlation record: `message_id` from `user_id`'s private
    /// chat was forwarded into the staff group as `forwarded_message_id`.
    pub async fn record(
        &self,
        user_id: i64,
        message_id: i32,
        forwarded_message_id: i32,
    ) -> Result<(), RelayError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO relayed_messages (user_id, message_id, forwarded_message_id)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![user_id, message_id, forwarded_message_id],
        )?;
        Ok(())
    }

    /// Resolve the user a group reply should be delivered to.
    ///
    /// `Ok(None)` means no record matches (stale or foreign reply target);
    /// that is an expected outcome, not an error. Should the platform ever
    /// reuse a forwarded id, the latest inserted record wins.
    pub async fn resolve_user(&self, forwarded_message_id: i32) -> Result<Option<i64>, RelayError> {
        let conn = self.conn.lock().await;
        let user_id = conn
            .query_row(
                "SELECT user_id FROM relayed_messages
                 WHERE forwarded_message_id = ?1
                 ORDER BY id DESC LIMIT 1",
                rusqlite::params![forwarded_message_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_then_resolve() {
        let store = CorrelationStore::open_in_memory().unwrap();

        store.record(111, 10, 500).await.unwrap();

        assert_eq!(store.resolve_user(500).await.unwrap(), Some(111));
    }

    #[tokio::test]
    async fn test_resolve_unknown_id_is_a_miss_not_an_error() {
        let store = CorrelationStore::open_in_memory().unwrap();

        assert_eq!(store.resolve_user(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_many_records_per_user() {
        let store = CorrelationStore::open_in_memory().unwrap();

        store.record(111, 10, 500).await.unwrap();
        store.record(111, 11, 501).await.unwrap();

        assert_eq!(store.resolve_user(500).await.unwrap(), Some(111));
        assert_eq!(store.resolve_user(501).await.unwrap(), Some(111));
    }

    #[tokio::test]
    async fn test_duplicate_forwarded_id_latest_record_wins() {
        let store = CorrelationStore::open_in_memory().unwrap();

        store.record(111, 10, 500).await.unwrap();
        store.record(222, 20, 500).await.unwrap();

        assert_eq!(store.resolve_user(500).await.unwrap(), Some(222));
    }

    #[tokio::test]
    async fn test_reopen_is_idempotent_and_keeps_records() {
        let path = std::path::PathBuf::from(format!(
            "/tmp/relaybot-store-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let store = CorrelationStore::open(&path).unwrap();
            store.record(111, 10, 500).await.unwrap();
        }

        // Second open re-runs the migrations against existing data
        let store = CorrelationStore::open(&path).unwrap();
        assert_eq!(store.resolve_user(500).await.unwrap(), Some(111));

        let count: i64 = store
            .conn
            .lock()
            .await
            .query_row("SELECT count(*) FROM relayed_messages", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        let _ = std::fs::remove_file(&path);
    }
}
