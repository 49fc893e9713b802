//! Custom error types for Cash Ledger
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::CountField;

/// The main error type for Cash Ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A bundle or open count that is not an optionally signed integer
    #[error("Invalid {field} count for ₹{denomination}: \"{text}\". Only numbers allowed.")]
    InvalidInput {
        denomination: u32,
        field: CountField,
        text: String,
    },

    /// Every denomination line came out as zero
    #[error("Please enter at least one denomination with valid numbers")]
    EmptySubmission,

    /// No authenticated principal for an owner-scoped operation
    #[error("Unauthorized: no signed-in user")]
    Unauthorized,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Any failure of the record store
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),
}

impl LedgerError {
    /// Create a "not found" error for ledger records
    pub fn record_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Record",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Cash Ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
