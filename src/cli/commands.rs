//! CLI commands and argument parsing

use crate::convert::ParquetCompression;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CloudHealth FlexReport operator tools
#[derive(Parser, Debug)]
#[command(name = "flexreport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CloudHealth API key (prompted for when absent)
    #[arg(long, global = true, env = "CLOUDHEALTH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// GraphQL endpoint, overrides settings and environment
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a FlexReport, wait for it, and download the CSV
    Execute {
        /// FlexReport ID (prompted for when absent)
        #[arg(long)]
        report_id: Option<String>,

        /// Directory receiving the downloaded file
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Also convert the downloaded CSV to Parquet
        #[arg(long)]
        parquet: bool,
    },

    /// Convert a CSV file to Parquet
    Convert {
        /// CSV file (prompted for when absent)
        csv_file: Option<PathBuf>,

        /// Output path (default: same directory and stem, .parquet)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Parquet compression codec
        #[arg(long, value_enum, default_value = "snappy")]
        compression: ParquetCompression,
    },

    /// Create FlexReports from a JSON manifest
    Create {
        /// Manifest file (prompted for when absent)
        manifest: Option<PathBuf>,

        /// File receiving the created report IDs
        #[arg(long)]
        ids_file: Option<PathBuf>,

        /// File receiving the names of created reports
        #[arg(long)]
        names_file: Option<PathBuf>,
    },
}
