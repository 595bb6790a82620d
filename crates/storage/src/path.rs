//! Relative path validation.
//!
//! Every path handed to an [`OutputTree`](crate::OutputTree) is resolved
//! against its root, so it must never climb out of it.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Normalizes a path relative to an output root.
///
/// Leading slashes, `.` segments and repeated separators are dropped, and
/// `..` segments are resolved. A path that would escape the root, is empty
/// once normalized, or contains a null byte is rejected with
/// [`InvalidPath`](crate::error::ErrorKind::InvalidPath).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use pressmark_storage::validate_path;
///
/// assert_eq!(validate_path("/2023/06/01/hello.md").unwrap(), Path::new("2023/06/01/hello.md"));
/// assert_eq!(validate_path("drafts/../2023//hello.md").unwrap(), Path::new("2023/hello.md"));
/// assert!(validate_path("/../etc/passwd.md").is_err());
/// assert!(validate_path("a\0b.md").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(original.to_path_buf());
    let mut components = Vec::new();
    for component in original.components() {
        match component {
            Component::Normal(segment) => {
                // Null bytes survive Path::components() on Unix but truncate in syscalls.
                if segment.as_encoded_bytes().contains(&0) {
                    exn::bail!(invalid());
                }
                components.push(segment);
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
        }
    }
    if components.is_empty() {
        exn::bail!(invalid());
    }
    Ok(components.into_iter().collect())
}
