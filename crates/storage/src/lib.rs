//! Writing exported documents to disk.
//!
//! An [`OutputTree`] is a directory that documents are written into by
//! relative path. Writes are skipped when the file already holds exactly the
//! bytes being written, so re-running an export only touches what changed.

pub mod error;
mod path;
mod tree;

pub use crate::path::validate as validate_path;
pub use crate::tree::{OutputTree, WriteOutcome};
