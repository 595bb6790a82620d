use async_stream::stream;
use exn::ResultExt;
use futures::{Stream, StreamExt};
use std::pin::pin;
use tracing::{info, instrument, warn};

use crate::Exporter;
use crate::error::{ErrorKind, Result};
use crate::report::{Exported, PostFailure, RunReport};

/// Progress events emitted by [`Exporter::export`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started) exactly once.
/// 2. [`DiscoveryComplete`](Self::DiscoveryComplete) exactly once, with the
///    number of published posts.
/// 3. For every page: [`PageFetched`](Self::PageFetched), followed by one
///    [`Exported`](Self::Exported) or [`Failed`](Self::Failed) per post.
/// 4. [`Complete`](Self::Complete) exactly once.
///
/// A fatal error terminates the stream early, in which case
/// [`Complete`](Self::Complete) is never emitted.
#[derive(Debug)]
pub enum ExportEvent {
    Started,
    DiscoveryComplete(u64),
    PageFetched { offset: u64, rows: u64 },
    Exported(Exported),
    Failed(PostFailure),
    Complete,
}

impl Exporter {
    /// Streams [`ExportEvent`]s while exporting every published post.
    ///
    /// Category slugs are loaded once, then posts are fetched `batch_size` at
    /// a time (offsets `0, batch_size, 2 * batch_size, ...` up to the count
    /// taken at the start) and exported one after the other.
    ///
    /// Posts that can't be exported are reported as
    /// [`Failed`](ExportEvent::Failed) without interrupting the export. Only
    /// database and filesystem errors end the stream, as an `Err` item.
    pub fn export(&self) -> impl Stream<Item = Result<ExportEvent>> + '_ {
        // `rustfmt` does not format macros that use braces. Wrap in parentheses!
        stream!({
            yield Ok(ExportEvent::Started);

            let categories = match self.source.categories().await.or_raise(|| ErrorKind::Source) {
                Ok(categories) => categories,
                Err(e) => {
                    yield Err(e);
                    return;
                },
            };
            let total = match self.source.count().await.or_raise(|| ErrorKind::Source) {
                Ok(total) => total,
                Err(e) => {
                    yield Err(e);
                    return;
                },
            };
            info!(total, categories = categories.len(), "Found published posts");
            yield Ok(ExportEvent::DiscoveryComplete(total));

            let mut offset = 0;
            while offset < total {
                let posts = match self.source.fetch(self.batch_size, offset).await.or_raise(|| ErrorKind::Source) {
                    Ok(posts) => posts,
                    Err(e) => {
                        yield Err(e);
                        return;
                    },
                };
                // Infallible: a usize (either 32- or 64-bit) will always fit in a u64.
                yield Ok(ExportEvent::PageFetched { offset, rows: u64::try_from(posts.len()).unwrap_or(0) });

                for post in &posts {
                    match self.export_post(post, &categories).await {
                        Ok(exported) => {
                            yield Ok(ExportEvent::Exported(exported));
                        },
                        Err(e) if e.is_fatal() => {
                            yield Err(e);
                            return;
                        },
                        Err(e) => {
                            let post_id = post.id();
                            warn!(post_id, error = ?e, "Skipping post");
                            yield Ok(ExportEvent::Failed(PostFailure { post_id, error: e }));
                        },
                    }
                }
                offset += self.batch_size;
            }

            yield Ok(ExportEvent::Complete);
        })
    }

    /// Export everything and return the totals.
    ///
    /// Stops at the first fatal error.
    #[instrument(skip(self), fields(batch_size = self.batch_size))]
    pub async fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();
        let mut events = pin!(self.export());
        while let Some(event) = events.next().await {
            report.record(event?);
        }
        info!(
            written = report.written,
            unchanged = report.unchanged,
            mirrored = report.mirrored,
            fetched = report.fetched,
            total = report.total_expected,
            failed = report.failures.len(),
            "Export complete"
        );
        Ok(report)
    }
}
