//! A local directory that documents are synced into.

use std::fs::create_dir_all as sync_create_dir;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;

/// What [`OutputTree::write_if_changed`] did with the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was written.
    Created,
    /// The file existed with different contents and was overwritten.
    Updated,
    /// The file already held identical bytes. Nothing was written.
    Unchanged,
}

impl WriteOutcome {
    /// Whether the file on disk was touched.
    pub fn is_written(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Directory on the local filesystem that files are written into.
///
/// All paths are relative to the root; a leading slash is allowed and
/// ignored, and nothing may escape the root.
///
/// # Examples
///
/// ```no_run
/// use pressmark_storage::{OutputTree, WriteOutcome};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let tree = OutputTree::new("/srv/blog/content")?;
/// let outcome = tree.write_if_changed(Path::new("/2023/06/01/hello.md"), b"# Hello\n").await?;
/// assert_eq!(outcome, WriteOutcome::Created);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OutputTree {
    root: PathBuf,
}

impl OutputTree {
    /// Open (or create) the directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if `root` is not
    /// absolute or exists but is not a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidPath(root));
            }
        } else {
            // Only happens once at startup; not worth making the constructor async.
            info!(path = %root.display(), "Creating directory");
            sync_create_dir(&root).map_err(|e| Self::map_io_error(e, &root))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path against the root.
    pub fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            IoErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }

    /// Write `data` to `path` unless the file already holds exactly `data`.
    ///
    /// Missing parent directories are created.
    #[instrument(level = "debug", skip(self, data), fields(bytes = data.len()))]
    pub async fn write_if_changed(&self, path: &Path, data: &[u8]) -> Result<WriteOutcome> {
        let abs_path = self.absolute_path(path)?;
        let outcome = match fs::read(&abs_path).await {
            Ok(existing) if existing == data => {
                debug!(path = %abs_path.display(), "Unchanged");
                return Ok(WriteOutcome::Unchanged);
            },
            Ok(_) => WriteOutcome::Updated,
            Err(e) if e.kind() == IoErrorKind::NotFound => WriteOutcome::Created,
            Err(e) => exn::bail!(Self::map_io_error(e, &abs_path)),
        };
        if let Some(parent) = abs_path.parent()
            && !fs::try_exists(parent).await.map_err(|e| Self::map_io_error(e, parent))?
        {
            info!(path = %parent.display(), "Creating directory");
            fs::create_dir_all(parent).await.map_err(|e| Self::map_io_error(e, parent))?;
        }
        fs::write(&abs_path, data).await.map_err(|e| Self::map_io_error(e, &abs_path))?;
        debug!(path = %abs_path.display(), ?outcome, "Written");
        Ok(outcome)
    }
}
