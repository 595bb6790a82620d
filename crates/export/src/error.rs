//! Export Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An export error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Errors carrying a post ID only affect that post: it is reported as failed
/// and the export moves on. The others abort the run.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Querying the database failed.
    #[display("could not read posts from the database")]
    Source,
    /// Writing to the output directory failed.
    #[display("could not write to the output directory")]
    Storage,
    /// The permalink structure cannot produce usable paths.
    #[display("invalid permalink structure: {_0:?}")]
    Permalink(#[error(not(source))] String),
    /// The post's metadata could not be normalized.
    #[display("post {_0}: invalid metadata")]
    Normalize(#[error(not(source))] u64),
    /// The post's output path could not be resolved.
    #[display("post {_0}: could not resolve output path")]
    Path(#[error(not(source))] u64),
    /// The post's content could not be transformed into Markdown.
    #[display("post {_0}: could not convert content")]
    Transform(#[error(not(source))] u64),
    /// The post's front matter could not be rendered.
    #[display("post {_0}: could not render front matter")]
    FrontMatter(#[error(not(source))] u64),
}

impl ErrorKind {
    /// Returns `true` if the whole export must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Source | Self::Storage | Self::Permalink(_))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Source | Self::Storage)
    }

    /// The post this error is about, if it only concerns one post.
    pub fn post_id(&self) -> Option<u64> {
        match self {
            Self::Normalize(id) | Self::Path(id) | Self::Transform(id) | Self::FrontMatter(id) => Some(*id),
            Self::Source | Self::Storage | Self::Permalink(_) => None,
        }
    }
}
