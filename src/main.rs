//! Command line entry point for exporting a WordPress blog to Markdown.

mod cli;
mod error;
mod logging;

use clap::Parser;
use exn::ResultExt;
use pressmark_config::Config;
use pressmark_export::{Exporter, Permalink, RunReport};
use pressmark_markdown::Html2Md;
use pressmark_source::{Database, Repository};
use pressmark_storage::OutputTree;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, instrument};

use crate::cli::Cli;
use crate::error::{ErrorKind, Result};

/// Exit status when the export finished but some posts were skipped.
const EXIT_PARTIAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level());
    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .or_raise(|| ErrorKind::Runtime)
        .and_then(|runtime| runtime.block_on(run(&cli)));
    match result {
        Ok(report) => {
            println!("{}", summary(&report));
            for failure in &report.failures {
                eprintln!("post {}: {:?}", failure.post_id, failure.error);
            }
            ExitCode::from(exit_status(&report))
        },
        Err(err) => {
            error!(error = ?err, "Export aborted");
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

#[instrument(skip_all)]
async fn run(cli: &Cli) -> Result<RunReport> {
    let config = Config::load(cli.config.as_deref(), &cli.overrides()).or_raise(|| ErrorKind::Config)?;
    let permalink: Permalink = config.permalink_structure.parse::<Permalink>().or_raise(|| ErrorKind::Config)?;
    let destination = OutputTree::new(&config.destination).or_raise(|| ErrorKind::Storage)?;
    let mirror = config.mirror.as_ref().map(OutputTree::new).transpose().or_raise(|| ErrorKind::Storage)?;

    let db = Database::connect(&config.database_url).await.or_raise(|| ErrorKind::Database)?;
    let repository = Repository::new(&db, &config.table_prefix).or_raise(|| ErrorKind::Database)?;
    let exporter = Exporter::new(Arc::new(repository), destination, permalink)
        .with_batch_size(u64::from(config.batch_size))
        .with_mirror(mirror)
        .with_converter(Html2Md {
            commonmark: config.markdown.commonmark,
            preserve_comments: config.markdown.preserve_comments,
        });

    let report = exporter.run().await.or_raise(|| ErrorKind::Export);
    db.close().await;
    report
}

fn summary(report: &RunReport) -> String {
    let mut summary = format!("Wrote {} of {} ({}) posts", report.written, report.fetched, report.total_expected);
    if report.mirrored > 0 {
        summary.push_str(&format!(", mirrored {}", report.mirrored));
    }
    if !report.is_clean() {
        summary.push_str(&format!(", {} failed", report.failures.len()));
    }
    summary
}

fn exit_status(report: &RunReport) -> u8 {
    match report.is_clean() {
        true => 0,
        false => EXIT_PARTIAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressmark_export::PostFailure;
    use pressmark_export::error::ErrorKind as ExportErrorKind;

    fn report() -> RunReport {
        RunReport { total_expected: 12, fetched: 12, written: 3, unchanged: 9, pages: 1, ..RunReport::default() }
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(&report()), "Wrote 3 of 12 (12) posts");
    }

    #[test]
    fn test_summary_with_mirror_and_failures() {
        let mut report = report();
        report.mirrored = 2;
        report.failures.push(PostFailure { post_id: 7, error: ExportErrorKind::Transform(7).into() });
        assert_eq!(summary(&report), "Wrote 3 of 12 (12) posts, mirrored 2, 1 failed");
    }

    #[test]
    fn test_exit_status() {
        let mut report = report();
        assert_eq!(exit_status(&report), 0);
        assert_eq!(exit_status(&RunReport::default()), 0);
        report.failures.push(PostFailure { post_id: 7, error: ExportErrorKind::Path(7).into() });
        assert_eq!(exit_status(&report), EXIT_PARTIAL);
    }
}
