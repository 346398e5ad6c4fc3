//! Domain error types.

use thiserror::Error;

/// Errors raised while building domain values from raw API data.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A raw order or product record could not be turned into a domain value.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A monetary value is missing or is not a decimal number.
    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    /// A shipped filter outside of true, false or unset.
    #[error("invalid shipped filter {0:?}: expected true, false or any")]
    InvalidFilter(String),
}
