// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # FlexReport Ops
//!
//! Operator tooling for CloudHealth FlexReports over the GraphQL API.
//!
//! ## Features
//!
//! - **Execute and download**: trigger a report, poll with backoff, stream the CSV to disk
//! - **CSV to Parquet**: DuckDB-backed conversion with a schema summary
//! - **Bulk creation**: create reports from a JSON manifest with unique names
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flexreport_ops::auth::Authenticator;
//! use flexreport_ops::graphql::GraphQlClient;
//! use flexreport_ops::http::HttpClient;
//! use flexreport_ops::report::{FlexReportApi, PollPolicy, ReportPoller, TokioSleeper};
//!
//! #[tokio::main]
//! async fn main() -> flexreport_ops::Result<()> {
//!     let mut client = GraphQlClient::new(HttpClient::new()?, "https://apps.cloudhealthtech.com/graphql");
//!     Authenticator::new("api-key")?.authenticate(&mut client).await?;
//!
//!     let api = FlexReportApi::new(client)?;
//!     api.execute_report("crn:1:flexreport/abc").await?;
//!
//!     let poller = ReportPoller::new(&api, &TokioSleeper, PollPolicy::default());
//!     let outcome = poller.wait_for_completion("crn:1:flexreport/abc", "Costs").await?;
//!     println!("{}", outcome.info.download_url()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        CLI (clap)                            │
//! │        execute          convert           create             │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────┬───────────┬─────┴─────┬────────────┬────────────┐
//! │   Auth    │  Report   │ Download  │  Convert   │    Bulk    │
//! ├───────────┼───────────┼───────────┼────────────┼────────────┤
//! │ API key → │ Info      │ Stream to │ DuckDB     │ Manifest   │
//! │ Bearer    │ Trigger   │ .part and │ COPY TO    │ Suffixes   │
//! │ token     │ Poll      │ rename    │ Parquet    │ ID lists   │
//! └───────────┴─────┬─────┴─────┬─────┴────────────┴────────────┘
//!                   │           │
//!             GraphQL client   HTTP client (reqwest, rate limit)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Settings file and defaults
pub mod config;

/// HTTP client with timeouts and rate limiting
pub mod http;

/// GraphQL envelope, error checks, and operation documents
pub mod graphql;

/// API key login
pub mod auth;

/// FlexReport queries, trigger, and completion polling
pub mod report;

/// Report file download and naming
pub mod download;

/// CSV to Parquet conversion via DuckDB
pub mod convert;

/// Bulk report creation from a manifest
pub mod bulk;

/// End-to-end flows used by the CLI
pub mod workflow;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;
