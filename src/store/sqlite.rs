//! SQLite store backend
//!
//! A single `kv` table, one row per key. `INSERT OR REPLACE` gives the same
//! whole-value overwrite semantics as the other backends.

use super::{validate_key, Blob, PersistentStore, StoreError, StoreResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (and create if needed) a database file
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl PersistentStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<Blob>> {
        validate_key(key)?;
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;

        Ok(value)
    }

    fn put(&self, key: &str, blob: Blob) -> StoreResult<()> {
        validate_key(key)?;
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, blob, Utc::now().timestamp_millis()],
        )?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_in_memory() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("has_onboarded").unwrap().is_none());

        store.put("has_onboarded", "true".to_string()).unwrap();
        assert_eq!(store.get("has_onboarded").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_overwrite_keeps_one_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.put("device_limits", "{}".to_string()).unwrap();
        store
            .put("device_limits", r#"{"gaming":2}"#.to_string())
            .unwrap();

        let conn = store.conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guardian.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .put("medication_schedule", "[]".to_string())
                .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get("medication_schedule").unwrap().as_deref(),
            Some("[]")
        );
    }
}
