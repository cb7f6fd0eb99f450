//! CLI runner - executes commands

use super::prompt::Prompter;
use crate::auth::Authenticator;
use crate::bulk::load_manifest;
use crate::cli::commands::{Cli, Commands};
use crate::config::Settings;
use crate::convert::{ConversionReport, ParquetCompression, ParquetConverter};
use crate::download::{format_size, Downloader};
use crate::error::{Error, Result};
use crate::graphql::GraphQlClient;
use crate::http::{HttpClient, HttpClientConfig};
use crate::report::{FlexReportApi, PollPolicy, TokioSleeper};
use crate::workflow;
use std::path::{Path, PathBuf};
use tracing::info;

const RULE_WIDTH: usize = 46;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    ///
    /// `convert` is offline and never reads settings.
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Execute {
                report_id,
                output_dir,
                parquet,
            } => {
                self.execute(&self.settings()?, report_id.clone(), output_dir, *parquet)
                    .await
            }
            Commands::Convert {
                csv_file,
                output,
                compression,
            } => self.convert(csv_file.clone(), output.as_deref(), *compression),
            Commands::Create {
                manifest,
                ids_file,
                names_file,
            } => {
                self.create(
                    &self.settings()?,
                    manifest.clone(),
                    ids_file.clone(),
                    names_file.clone(),
                )
                .await
            }
        }
    }

    /// Settings file, environment, then `--endpoint`
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.cli.settings.as_deref())?;
        if let Some(ref endpoint) = self.cli.endpoint {
            settings.endpoint.clone_from(endpoint);
            settings.validate()?;
        }
        Ok(settings)
    }

    /// Authenticate and return the report API
    async fn connect(&self, settings: &Settings) -> Result<FlexReportApi> {
        let api_key = Prompter::stdio().value_or_ask(
            self.cli.api_key.clone(),
            "Enter your CloudHealth API key",
            "API key",
        )?;

        println!();
        println!("Authenticating with CloudHealth API...");

        let http = HttpClient::with_config(HttpClientConfig::from_settings(&settings.http))?;
        let mut client = GraphQlClient::new(http, settings.endpoint.clone());
        Authenticator::new(api_key)?
            .authenticate(&mut client)
            .await?;

        println!("Authentication successful");
        println!();
        FlexReportApi::new(client)
    }

    /// Execute a report and download the result
    async fn execute(
        &self,
        settings: &Settings,
        report_id: Option<String>,
        output_dir: &Path,
        parquet: bool,
    ) -> Result<()> {
        print_header("CloudHealth FlexReport Execution Tool");
        println!();

        let api = self.connect(settings).await?;
        let report_id =
            Prompter::stdio().value_or_ask(report_id, "Enter FlexReport ID", "FlexReport ID")?;
        println!();

        let downloader = Downloader::new(settings.http.download_timeout())?;
        let result = workflow::execute_and_download(
            &api,
            &TokioSleeper,
            PollPolicy::from(&settings.poll),
            &downloader,
            &report_id,
            output_dir,
        )
        .await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                print_failure(&e);
                return Err(e);
            }
        };

        println!();
        print_header("DOWNLOAD COMPLETE");
        println!("Report Name: {}", outcome.report_name);
        println!("Status checks: {}", outcome.checks);
        if let Some(updated) = outcome.updated_on {
            println!("Report updated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        println!("File saved: {}", outcome.file.display());
        println!("File size: {}", format_size(outcome.bytes));
        println!();

        if parquet {
            let report = ParquetConverter::new()?.convert(&outcome.file)?;
            print_conversion(&report);
        }

        Ok(())
    }

    /// Convert a CSV file to Parquet
    fn convert(
        &self,
        csv_file: Option<PathBuf>,
        output: Option<&Path>,
        compression: ParquetCompression,
    ) -> Result<()> {
        let csv_file = Prompter::stdio()
            .value_or_ask(
                csv_file.map(|p| p.to_string_lossy().into_owned()),
                "CSV file to convert to Parquet",
                "Filename",
            )
            .map(PathBuf::from)?;

        let converter = ParquetConverter::new()?.with_compression(compression);
        let report = match output {
            Some(out) => converter.convert_to(&csv_file, out)?,
            None => converter.convert(&csv_file)?,
        };

        print_conversion(&report);
        Ok(())
    }

    /// Bulk-create reports from a manifest
    async fn create(
        &self,
        settings: &Settings,
        manifest: Option<PathBuf>,
        ids_file: Option<PathBuf>,
        names_file: Option<PathBuf>,
    ) -> Result<()> {
        let manifest = Prompter::stdio()
            .value_or_ask(
                manifest.map(|p| p.to_string_lossy().into_owned()),
                "Enter the JSON filename",
                "Filename",
            )
            .map(PathBuf::from)?;
        let definitions = load_manifest(&manifest)?;
        info!(
            manifest = %manifest.display(),
            count = definitions.len(),
            "Loaded report definitions"
        );

        let api = self.connect(settings).await?;

        let ids_file = ids_file.unwrap_or_else(|| PathBuf::from(&settings.bulk.ids_file));
        let names_file = names_file.unwrap_or_else(|| PathBuf::from(&settings.bulk.names_file));

        let summary = workflow::create_reports(
            &api,
            &definitions,
            settings.bulk.suffix_len,
            &ids_file,
            &names_file,
        )
        .await?;

        println!();
        print_header("BULK CREATION COMPLETE");
        for report in &summary.created {
            println!("Created: {} ({})", report.name, report.id);
        }
        for report in &summary.failed {
            println!("Failed:  {} - {}", report.name, report.reason);
        }
        println!();
        println!(
            "{} created, {} failed",
            summary.created.len(),
            summary.failed.len()
        );
        println!("IDs written to: {}", ids_file.display());
        println!("Names written to: {}", names_file.display());

        Ok(())
    }
}

fn print_header(text: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("{text}");
    println!("{rule}");
}

/// Banner and hint printed for a failed execute run
#[derive(Debug, Clone, PartialEq, Eq)]
struct FailureNotice {
    title: String,
    hints: &'static [&'static str],
}

fn failure_notice(error: &Error) -> Option<FailureNotice> {
    let (title, hints): (String, &'static [&'static str]) = match error {
        Error::ReportQueued { .. } => (
            "WARNING: Report is QUEUED".to_string(),
            &[
                "This may indicate the report is waiting for resources.",
                "Please check status in the CloudHealth platform.",
            ],
        ),
        Error::ReportFailed { .. } => (
            "ERROR: REPORT EXECUTION FAILED".to_string(),
            &["Please check the report configuration in the CloudHealth platform."],
        ),
        Error::PollTimeout { checks } => (
            format!("TIMEOUT: Report still running after {checks} checks"),
            &[
                "The report is taking longer than expected.",
                "Please check status in the CloudHealth platform.",
            ],
        ),
        Error::Download { .. } => (
            "ERROR: DOWNLOAD FAILED".to_string(),
            &["Please try downloading manually from the CloudHealth platform."],
        ),
        Error::Http(_)
        | Error::HttpStatus { .. }
        | Error::Timeout { .. }
        | Error::GraphQl { .. }
        | Error::MissingField { .. } => (
            "ERROR: CLOUDHEALTH API REQUEST FAILED".to_string(),
            &["The report could not be triggered or its status could not be checked."],
        ),
        _ => return None,
    };
    Some(FailureNotice { title, hints })
}

fn print_failure(error: &Error) {
    let Some(notice) = failure_notice(error) else {
        return;
    };
    println!();
    print_header(&notice.title);
    for hint in notice.hints {
        println!("{hint}");
    }
}

fn print_conversion(report: &ConversionReport) {
    println!("Conversion successful!");
    println!("File: {}", report.output.display());
    println!("Size: {}", format_size(report.bytes));
    println!(
        "Rows: {}, Columns: {}",
        report.summary.num_rows,
        report.summary.column_names().join(", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsStr;

    #[tokio::test]
    async fn test_convert_does_not_read_settings() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("costs.csv");
        std::fs::write(&csv, "account,cost\n111,1.5\n222,2.5\n").unwrap();
        let missing = dir.path().join("missing.yaml");

        let cli = Cli::try_parse_from([
            OsStr::new("flexreport"),
            OsStr::new("--settings"),
            missing.as_os_str(),
            OsStr::new("convert"),
            csv.as_os_str(),
        ])
        .unwrap();
        Runner::new(cli).run().await.unwrap();

        assert!(dir.path().join("costs.parquet").is_file());
    }

    #[tokio::test]
    async fn test_execute_reads_settings_first() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");

        let cli = Cli::try_parse_from([
            OsStr::new("flexreport"),
            OsStr::new("--settings"),
            missing.as_os_str(),
            OsStr::new("execute"),
            OsStr::new("--report-id"),
            OsStr::new("r1"),
        ])
        .unwrap();
        let err = Runner::new(cli).run().await.unwrap_err();

        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_api_errors_are_not_download_failures() {
        for error in [
            Error::http_status(500, "Internal Server Error"),
            Error::Timeout { timeout_ms: 30_000 },
            Error::GraphQl {
                messages: vec!["node not found".to_string()],
            },
        ] {
            let notice = failure_notice(&error).unwrap();
            assert_eq!(notice.title, "ERROR: CLOUDHEALTH API REQUEST FAILED");
        }
    }

    #[test]
    fn test_download_error_gets_download_banner() {
        let notice = failure_notice(&Error::download("HTTP 403: expired")).unwrap();
        assert_eq!(notice.title, "ERROR: DOWNLOAD FAILED");
    }

    #[test]
    fn test_poll_outcomes() {
        let notice = failure_notice(&Error::PollTimeout { checks: 5 }).unwrap();
        assert_eq!(notice.title, "TIMEOUT: Report still running after 5 checks");

        let notice = failure_notice(&Error::ReportQueued {
            name: "r".to_string(),
        })
        .unwrap();
        assert_eq!(notice.title, "WARNING: Report is QUEUED");

        assert!(failure_notice(&Error::Cancelled).is_none());
    }
}
