//! Error types for EZ Eatin'
//!
//! This module defines all error types used throughout the crate,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for shopping list operations
///
/// Validation variants are raised before any state is touched and are meant
/// to be shown to the user as a notice. Storage and migration variants come
/// from the persistence layer and are propagated as-is.
#[derive(Error, Debug)]
pub enum EzEatinError {
    /// A list or item name was empty or only whitespace
    #[error("Name cannot be empty")]
    EmptyName,

    /// Item quantity was zero, negative, or not a finite number
    #[error("Quantity must be greater than 0 (got {0})")]
    InvalidQuantity(f64),

    /// Item estimated price was negative or not a finite number
    #[error("Estimated price cannot be negative (got {0})")]
    InvalidPrice(f64),

    /// Attempted to delete the only remaining shopping list
    #[error("Cannot delete the last shopping list")]
    LastList,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value backend errors (open, read, write, flush)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Persisted data could not be parsed or brought up to the current schema
    #[error("Migration error: {0}")]
    Migration(String),
}

impl EzEatinError {
    /// Whether this error is a rejected user input rather than a failure
    ///
    /// Validation errors guarantee that no state was mutated.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName | Self::InvalidQuantity(_) | Self::InvalidPrice(_) | Self::LastList
        )
    }
}

/// Returns the validation error carried by `err`, if any
///
/// # Examples
///
/// ```
/// use ezeatin::error::{validation_error, EzEatinError};
///
/// let err: anyhow::Error = EzEatinError::LastList.into();
/// assert!(validation_error(&err).is_some());
///
/// let err: anyhow::Error = EzEatinError::Storage("disk full".into()).into();
/// assert!(validation_error(&err).is_none());
/// ```
pub fn validation_error(err: &anyhow::Error) -> Option<&EzEatinError> {
    err.downcast_ref::<EzEatinError>()
        .filter(|e| e.is_validation())
}

/// Result type alias for EZ Eatin' operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
