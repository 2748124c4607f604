//! Error types for daybucket-core.
//!
//! Only structural problems surface as errors: bad arguments, unknown
//! timezones, malformed documents and missing ledger records. Problems with
//! a single timeline segment are logged and skipped by the callers instead.

use thiserror::Error;

/// The main error type for daybucket operations.
#[derive(Debug, Error)]
pub enum DayBucketError {
    /// Invalid timezone name provided.
    #[error("Unknown timezone '{0}'. Use an IANA name like 'America/Los_Angeles'")]
    InvalidTimezone(String),

    /// Invalid caller-supplied argument (mode, weekday list, year...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Document does not have the expected shape.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Error parsing a timestamp or a serialized document.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A ledger record (state, office) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for daybucket operations.
pub type Result<T> = std::result::Result<T, DayBucketError>;
