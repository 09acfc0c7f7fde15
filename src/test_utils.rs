//! Test utilities for EZ Eatin'
//!
//! Shared fixtures for unit tests: an in-memory list store and error
//! assertion helpers.

use crate::error::{validation_error, EzEatinError, Result};
use crate::shopping::ListStore;
use crate::storage::MemoryStore;

/// Open a list store over an empty in-memory backend
///
/// The store starts with the single default list.
///
/// # Panics
///
/// Panics if opening fails, which the memory backend never does.
pub fn open_memory_store() -> ListStore<MemoryStore> {
    ListStore::open(MemoryStore::new()).expect("Failed to open in-memory list store")
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}', got Ok", expected),
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{}', got '{}'",
                expected,
                msg
            );
        }
    }
}

/// Assert that `result` failed validation and return the error
///
/// # Panics
///
/// Panics if the result is Ok or failed for a non-validation reason
pub fn expect_rejected<T: std::fmt::Debug>(result: Result<T>) -> EzEatinError {
    let err = result.expect_err("Expected a validation error, got Ok");
    match validation_error(&err) {
        Some(EzEatinError::EmptyName) => EzEatinError::EmptyName,
        Some(EzEatinError::InvalidQuantity(q)) => EzEatinError::InvalidQuantity(*q),
        Some(EzEatinError::InvalidPrice(p)) => EzEatinError::InvalidPrice(*p),
        Some(EzEatinError::LastList) => EzEatinError::LastList,
        _ => panic!("Expected a validation error, got '{}'", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory_store_has_default_list() {
        let store = open_memory_store();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_assert_error_contains_matches() {
        let result: Result<()> = Err(EzEatinError::Config("bad value".to_string()).into());
        assert_error_contains(result, "bad value");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_panics_on_ok() {
        assert_error_contains(Ok(()), "anything");
    }

    #[test]
    fn test_expect_rejected_returns_variant() {
        let result: Result<()> = Err(EzEatinError::LastList.into());
        assert!(matches!(expect_rejected(result), EzEatinError::LastList));
    }
}
