//! Error types for Casebook.

use thiserror::Error;

/// Errors from the core value types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A timestamp could not be parsed.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}
