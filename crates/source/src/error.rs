//! Source Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The database could not be reached, or the connection URL is invalid.
    #[display("database connection error")]
    Connection,
    /// A query failed to execute or its rows could not be decoded.
    #[display("database error")]
    Database,
    /// Table prefixes are interpolated into queries, so only `[A-Za-z0-9_]`
    /// is accepted.
    #[display("invalid table prefix: {_0:?}")]
    InvalidPrefix(#[error(not(source))] String),
    /// The database returned a value outside of the expected range.
    #[display("invalid data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection)
    }
}
