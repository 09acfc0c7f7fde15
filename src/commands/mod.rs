//! Command handlers for the CLI
//!
//! Each handler opens the list store, performs one operation, and prints
//! the outcome. Validation errors are shown as a notice and do not fail the
//! process; everything else propagates.

use crate::config::Config;
use crate::error::{validation_error, Result};
use crate::shopping::ListStore;
use crate::storage;
use colored::Colorize;

pub mod items;
pub mod lists;
pub mod schema;
pub mod show;

/// Open the configured backend and load all lists
pub fn open_store(config: &Config) -> Result<ListStore> {
    let backend = storage::open_backend(&config.storage)?;
    ListStore::open(backend)
}

/// Turn a rejected input into a printed notice
///
/// Returns `Ok(None)` after printing when `result` failed validation,
/// `Ok(Some(value))` on success, and the error itself otherwise.
pub(crate) fn notify_rejected<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => match validation_error(&err) {
            Some(rejected) => {
                tracing::debug!("Operation rejected: {}", rejected);
                println!("{}", rejected.to_string().yellow());
                Ok(None)
            }
            None => Err(err),
        },
    }
}
