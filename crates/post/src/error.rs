//! Post Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A post normalization error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for post operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A column the normalization depends on was not selected (or was NULL).
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    /// A timestamp column could not be parsed as `YYYY-MM-DD HH:MM:SS`.
    #[display("malformed timestamp in '{field}', found value: {value}")]
    MalformedTimestamp {
        /// The column that failed to parse.
        field: &'static str,
        /// The offending value.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Rows don't change between retries; the data is either valid or not.
        false
    }
}
