//! Exporting published WordPress posts as Markdown documents.
//!
//! The [`Exporter`] ties the other crates together. For every post it:
//!
//! 1. normalizes the row into front matter [metadata](pressmark_post::models::Metadata),
//! 2. resolves the output path from the [`Permalink`] structure,
//! 3. writes the raw HTML to the mirror tree, if one is configured,
//! 4. converts the HTML to Markdown and renders the front matter, and
//! 5. writes the document, unless the file already holds the same bytes.
//!
//! Progress is available as a stream of [`ExportEvent`]s via
//! [`Exporter::export`], or summarized as a [`RunReport`] by
//! [`Exporter::run`].

pub mod error;
mod exporter;
mod permalink;
mod report;
mod stream;

pub use crate::exporter::{DEFAULT_BATCH_SIZE, Exporter};
pub use crate::permalink::{DEFAULT_STRUCTURE, Permalink};
pub use crate::report::{Exported, PostFailure, RunReport};
pub use crate::stream::ExportEvent;
