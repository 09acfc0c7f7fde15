//! Key-value persistence for shopping lists
//!
//! Everything the app remembers between runs goes through the
//! [`KeyValueStore`] trait: three fixed keys holding JSON values. Backends
//! are swappable through configuration.

use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;
use serde_json::Value;

pub mod memory;
pub mod migrations;
pub mod sled_store;
pub mod sqlite_store;

pub use memory::MemoryStore;
pub use migrations::{ListDocument, MigrationReport, CURRENT_SCHEMA_VERSION};
pub use sled_store::SledStore;
pub use sqlite_store::SqliteStore;

/// Key holding the list document (all saved lists)
pub const SHOPPING_LISTS_KEY: &str = "shopping-lists";

/// Key holding the id of the current list as a JSON string
pub const CURRENT_LIST_ID_KEY: &str = "current-list-id";

/// Key of the pre-multi-list format: a bare array of items
pub const LEGACY_LIST_KEY: &str = "current-shopping-list";

/// Durable key-value storage for JSON values
///
/// Implementations make no transactional promises: each call either lands
/// or returns an error, and callers do not retry.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Overwrite the value stored under `key`
    fn save(&mut self, key: &str, value: &Value) -> Result<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        (**self).save(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Open the backend selected by `config`
///
/// # Errors
///
/// Returns `EzEatinError::Storage` if the data directory cannot be
/// determined or the database cannot be opened.
pub fn open_backend(config: &StorageConfig) -> Result<Box<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::debug!("Using in-memory storage; nothing will be persisted");
            Ok(Box::new(MemoryStore::new()))
        }
        StorageBackend::Sled => {
            let path = config.resolved_path()?;
            tracing::debug!("Opening sled store at {}", path.display());
            Ok(Box::new(SledStore::open(path)?))
        }
        StorageBackend::Sqlite => {
            let path = config.resolved_path()?;
            tracing::debug!("Opening sqlite store at {}", path.display());
            Ok(Box::new(SqliteStore::new_with_path(path)?))
        }
    }
}
