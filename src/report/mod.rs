//! FlexReport execution
//!
//! Trigger a report, poll its status until it reaches a terminal state, and
//! hand back the final report info carrying the download URL.
//!
//! # Poll policy
//!
//! - wait `initial_delay` before the first check
//! - COMPLETED stops with success
//! - QUEUED and FAILED stop immediately with an error
//! - anything else is checked again after a growing delay, until
//!   `max_checks` checks have been made

mod api;
mod poller;
mod types;

pub use api::{FlexReportApi, ReportSource};
pub use poller::{PollOutcome, PollPolicy, ReportPoller, Sleeper, TokioSleeper};
pub use types::{ReportContent, ReportInfo, ReportResult};
