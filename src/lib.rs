//! EZ Eatin' - shopping list library
//!
//! This library provides the shopping list core of the EZ Eatin' meal
//! planner: several named lists, one of them current, mirrored into a
//! key-value store after every change.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `shopping`: list and item records, the `ListStore` context, operations
//! - `storage`: key-value backends (sled, SQLite, memory) and schema migrations
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface definition and handlers
//!
//! # Example
//!
//! ```
//! use ezeatin::shopping::{ItemDraft, ListStore};
//! use ezeatin::storage::MemoryStore;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut store = ListStore::open(MemoryStore::new())?;
//!     store.add_item(ItemDraft::new("Milk").with_price(4.5))?;
//!     store.create("Party Supplies")?;
//!     assert_eq!(store.len(), 2);
//!     assert_eq!(store.current().name, "Party Supplies");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod shopping;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{EzEatinError, Result};
pub use shopping::{ItemDraft, ListStore, SavedShoppingList, ShoppingListItem};
pub use storage::{KeyValueStore, MemoryStore};

#[cfg(test)]
pub mod test_utils;
