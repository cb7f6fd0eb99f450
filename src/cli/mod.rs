//! CLI module
//!
//! Command-line interface for the FlexReport tools.
//!
//! # Commands
//!
//! - `execute` - Run a report, wait for it, download the CSV
//! - `convert` - Convert a CSV file to Parquet
//! - `create` - Create reports from a JSON manifest

mod commands;
mod prompt;
mod runner;

pub use commands::{Cli, Commands};
pub use prompt::Prompter;
pub use runner::Runner;
