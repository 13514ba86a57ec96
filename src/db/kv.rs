//! Persistence gateway — string keys to whole-collection JSON blobs.
//!
//! The journal persists exactly two collections: the entry map and the
//! custom emotion list. Both are stored as single JSON blobs under fixed
//! keys, the same keys the data originally lived under in web storage.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};

use super::StorageError;

/// Storage key for the entry collection.
pub const ENTRIES_KEY: &str = "healthEntries";

/// Storage key for the custom emotion list.
pub const EMOTIONS_KEY: &str = "customCategories";

/// Opaque key/value persistence contract.
///
/// Writes are synchronous and unacknowledged beyond the `Result`; a failed
/// write is surfaced to the caller and never retried.
pub trait Gateway {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// SQLite-backed gateway over the `kv_store` table.
pub struct SqliteGateway {
    conn: Connection,
}

impl SqliteGateway {
    /// Open (or create) the gateway database at the given path.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            conn: super::sqlite::open_database(path)?,
        })
    }

    /// Open an in-memory gateway (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            conn: super::sqlite::open_memory_database()?,
        })
    }
}

impl Gateway for SqliteGateway {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;
        match stmt.query_row([key], |row| row.get::<_, String>(0)) {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory gateway for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    map: HashMap<String, String>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key before handing the gateway to the journal (test setup).
    pub fn seed(mut self, key: &str, value: &str) -> Self {
        self.map.insert(key.into(), value.into());
        self
    }

    /// Raw blob currently stored under a key.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }
}

impl Gateway for MemoryGateway {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map.insert(key.into(), value.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_returns_none() {
        let gw = SqliteGateway::in_memory().unwrap();
        assert!(gw.get("nothing-here").unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut gw = SqliteGateway::in_memory().unwrap();
        gw.set(ENTRIES_KEY, r#"{"version":2,"days":{}}"#).unwrap();
        assert_eq!(
            gw.get(ENTRIES_KEY).unwrap().as_deref(),
            Some(r#"{"version":2,"days":{}}"#)
        );
    }

    #[test]
    fn set_overwrites_existing_value() {
        let mut gw = SqliteGateway::in_memory().unwrap();
        gw.set(EMOTIONS_KEY, "[]").unwrap();
        gw.set(EMOTIONS_KEY, r##"[{"name":"Calma","color":"#00ff00"}]"##)
            .unwrap();
        let stored = gw.get(EMOTIONS_KEY).unwrap().unwrap();
        assert!(stored.contains("Calma"));
    }

    #[test]
    fn keys_are_independent() {
        let mut gw = SqliteGateway::in_memory().unwrap();
        gw.set(ENTRIES_KEY, "a").unwrap();
        gw.set(EMOTIONS_KEY, "b").unwrap();
        assert_eq!(gw.get(ENTRIES_KEY).unwrap().as_deref(), Some("a"));
        assert_eq!(gw.get(EMOTIONS_KEY).unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn sqlite_gateway_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.db");

        let mut gw = SqliteGateway::open(&path).unwrap();
        gw.set(ENTRIES_KEY, "persisted").unwrap();
        drop(gw);

        let gw2 = SqliteGateway::open(&path).unwrap();
        assert_eq!(gw2.get(ENTRIES_KEY).unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn memory_gateway_round_trips() {
        let mut gw = MemoryGateway::new();
        gw.set("k", "v").unwrap();
        assert_eq!(gw.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(gw.raw("k"), Some("v"));
    }
}
