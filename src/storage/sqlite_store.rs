use super::KeyValueStore;
use crate::error::{EzEatinError, Result};
use anyhow::Context;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::PathBuf;

/// Key-value store backed by a single SQLite table
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Create a store that uses the specified database path.
    ///
    /// The parent directory is created if needed and the schema is
    /// initialized on first use.
    ///
    /// # Examples
    ///
    /// ```
    /// use ezeatin::storage::SqliteStore;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = SqliteStore::new_with_path(dir.path().join("lists.db")).unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        // Ensure parent directory exists so opening the DB file succeeds.
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create parent directory for database")
                .map_err(|e| EzEatinError::Storage(e.to_string()))?;
        }

        let storage = Self { db_path };
        storage.init()?;
        Ok(storage)
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(|e| EzEatinError::Storage(e.to_string()))?;
        Ok(conn)
    }

    /// Initialize the database schema
    fn init(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value JSON NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create tables")
        .map_err(|e| EzEatinError::Storage(e.to_string()))?;

        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let conn = self.connect()?;

        let raw: Option<String> = conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()
            .context("Failed to query key")
            .map_err(|e| EzEatinError::Storage(e.to_string()))?;

        match raw {
            Some(json) => {
                let value = serde_json::from_str(&json)
                    .with_context(|| format!("Failed to deserialize value of {}", key))
                    .map_err(|e| EzEatinError::Storage(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        let conn = self.connect()?;
        let json = serde_json::to_string(value)
            .context("Failed to serialize value")
            .map_err(|e| EzEatinError::Storage(e.to_string()))?;

        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, json, Utc::now().to_rfc3339()],
        )
        .context("Failed to write key")
        .map_err(|e| EzEatinError::Storage(e.to_string()))?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM kv WHERE key = ?", params![key])
            .context("Failed to delete key")
            .map_err(|e| EzEatinError::Storage(e.to_string()))?;
        Ok(())
    }
}
