//! End-to-end flows behind the CLI commands
//!
//! Each flow is a straight sequence of calls. The CLI runner adds prompts
//! and operator output around them.

use crate::bulk::{BulkCreator, BulkSummary, ReportDefinition};
use crate::download::{sanitize_filename, Downloader};
use crate::error::{Error, Result};
use crate::report::{FlexReportApi, PollPolicy, ReportPoller, Sleeper};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a completed execute-and-download run produced
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// Report display name
    pub report_name: String,
    /// Status checks made before COMPLETED
    pub checks: u32,
    /// When the platform last refreshed the report result
    pub updated_on: Option<DateTime<Utc>>,
    /// Downloaded CSV
    pub file: PathBuf,
    /// Size of the downloaded file in bytes
    pub bytes: u64,
}

/// Trigger a report, wait for it, and download its first content
pub async fn execute_and_download(
    api: &FlexReportApi,
    sleeper: &dyn Sleeper,
    policy: PollPolicy,
    downloader: &Downloader,
    report_id: &str,
    output_dir: &Path,
) -> Result<ExecutionOutcome> {
    let info = api.get_report_info(report_id).await?;
    let report_name = info
        .name()
        .ok_or_else(|| Error::missing_field("data.node.name"))?
        .to_string();

    info!("Executing report: {report_name}");
    api.execute_report(report_id).await?;

    let poller = ReportPoller::new(api, sleeper, policy);
    let outcome = poller
        .wait_for_completion(report_id, &report_name)
        .await
        .inspect_err(|e| {
            if e.is_poll_terminal() {
                warn!(report_id, "Report did not complete: {e}");
            }
        })?;

    let updated_on = outcome.info.updated_on().map(|d| d.with_timezone(&Utc));
    let url = outcome.info.download_url()?;
    let file = output_dir.join(format!("{}.csv", sanitize_filename(&report_name)));
    debug!(url, file = %file.display(), "Downloading report");

    let bytes = downloader.download(url, &file).await?;

    Ok(ExecutionOutcome {
        report_name,
        checks: outcome.checks,
        updated_on,
        file,
        bytes,
    })
}

/// Create every definition, then write both list files
pub async fn create_reports(
    api: &FlexReportApi,
    definitions: &[ReportDefinition],
    suffix_len: usize,
    ids_file: &Path,
    names_file: &Path,
) -> Result<BulkSummary> {
    info!(count = definitions.len(), "Creating FlexReports");

    let summary = BulkCreator::new(api, suffix_len).run(definitions).await;
    summary.write_lists(ids_file, names_file)?;

    info!(
        created = summary.created.len(),
        failed = summary.failed.len(),
        "Bulk creation finished"
    );
    Ok(summary)
}
