//! Markdown Error Types

use derive_more::{Display, Error};

/// A transformation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for transformation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Both variants concern a single post; the export carries on with the next.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTML body could not be turned into Markdown.
    #[display("could not convert content to markdown: {_0}")]
    Conversion(#[error(not(source))] String),
    /// The metadata could not be serialized as front matter.
    #[display("could not serialize front matter")]
    Serialization,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Same input, same output.
        false
    }
}
