//! Application Error Types

use derive_more::{Display, Error};

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for the command line entry point.
pub type Result<T> = std::result::Result<T, Error>;

/// The stage of a run that failed.
///
/// Each wraps the lower crate's error tree, which carries the detail.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configuration could not be loaded or failed validation.
    #[display("invalid configuration")]
    Config,
    /// Connecting to MySQL or preparing the queries failed.
    #[display("could not connect to the database")]
    Database,
    /// The destination or mirror directory could not be opened or created.
    #[display("could not open the output directory")]
    Storage,
    /// The Tokio runtime could not be built.
    #[display("could not start the async runtime")]
    Runtime,
    /// The export aborted part way; posts already written stay on disk.
    #[display("export failed")]
    Export,
}
