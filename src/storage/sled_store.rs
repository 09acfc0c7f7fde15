//! Embedded `sled` backend
//!
//! Values are stored as JSON bytes under their string key. Every write is
//! flushed before returning so a crash never loses an acknowledged save.

use super::KeyValueStore;
use crate::error::{EzEatinError, Result};
use serde_json::Value;
use sled::Db;
use std::path::Path;

/// Key-value store backed by a `sled` database directory
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open or create a store
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the database directory
    ///
    /// # Errors
    ///
    /// Returns `EzEatinError::Storage` if database cannot be opened
    ///
    /// # Examples
    ///
    /// ```
    /// use ezeatin::storage::SledStore;
    ///
    /// # fn main() -> ezeatin::error::Result<()> {
    /// let dir = tempfile::tempdir()?;
    /// let store = SledStore::open(dir.path().join("lists.sled"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| EzEatinError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }

    fn flush(&self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| EzEatinError::Storage(format!("Flush failed: {}", e)))?;
        Ok(())
    }
}

impl KeyValueStore for SledStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        match self
            .db
            .get(key.as_bytes())
            .map_err(|e| EzEatinError::Storage(format!("Get failed: {}", e)))?
        {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(|e| {
                    EzEatinError::Storage(format!("Deserialization of {} failed: {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| EzEatinError::Storage(format!("Serialization failed: {}", e)))?;

        self.db
            .insert(key.as_bytes(), bytes)
            .map_err(|e| EzEatinError::Storage(format!("Insert failed: {}", e)))?;

        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| EzEatinError::Storage(format!("Remove failed: {}", e)))?;

        self.flush()
    }
}
