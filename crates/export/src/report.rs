use pressmark_storage::WriteOutcome;
use std::path::PathBuf;

use crate::error::Error;
use crate::stream::ExportEvent;

/// A post that made it to disk (or was already there).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub post_id: u64,
    /// Path of the document, relative to the destination root.
    pub path: PathBuf,
    pub outcome: WriteOutcome,
    /// What happened to the raw content copy, when mirroring is enabled.
    pub mirror: Option<WriteOutcome>,
}

/// A post that was skipped because it couldn't be exported.
#[derive(Debug)]
pub struct PostFailure {
    pub post_id: u64,
    pub error: Error,
}

/// Totals of a finished export.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Published posts counted before the export started.
    pub total_expected: u64,
    /// Posts returned by the page queries.
    pub fetched: u64,
    /// Documents created or overwritten.
    pub written: u64,
    /// Documents that already had identical contents.
    pub unchanged: u64,
    /// Raw content copies created or overwritten.
    pub mirrored: u64,
    /// Page queries issued.
    pub pages: u64,
    pub failures: Vec<PostFailure>,
}

impl RunReport {
    /// Fold a single event into the totals.
    pub fn record(&mut self, event: ExportEvent) {
        match event {
            ExportEvent::Started | ExportEvent::Complete => {},
            ExportEvent::DiscoveryComplete(total) => self.total_expected = total,
            ExportEvent::PageFetched { rows, .. } => {
                self.pages += 1;
                self.fetched += rows;
            },
            ExportEvent::Exported(exported) => {
                match exported.outcome.is_written() {
                    true => self.written += 1,
                    false => self.unchanged += 1,
                }
                if exported.mirror.is_some_and(WriteOutcome::is_written) {
                    self.mirrored += 1;
                }
            },
            ExportEvent::Failed(failure) => self.failures.push(failure),
        }
    }

    /// `true` when no post failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
