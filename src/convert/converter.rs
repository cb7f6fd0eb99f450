//! DuckDB-backed CSV to Parquet converter

use super::summary::ParquetSummary;
use crate::error::{Error, Result, ResultExt};
use duckdb::Connection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parquet compression codec passed to DuckDB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParquetCompression {
    #[default]
    Snappy,
    Zstd,
    Gzip,
    Uncompressed,
}

impl ParquetCompression {
    /// Codec name as DuckDB spells it
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Snappy => "snappy",
            Self::Zstd => "zstd",
            Self::Gzip => "gzip",
            Self::Uncompressed => "uncompressed",
        }
    }
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Input CSV file
    pub input: PathBuf,
    /// Written Parquet file
    pub output: PathBuf,
    /// Size of the Parquet file in bytes
    pub bytes: u64,
    /// Rows and columns read back from the Parquet footer
    pub summary: ParquetSummary,
}

/// Converts CSV files to Parquet using an in-memory DuckDB
pub struct ParquetConverter {
    conn: Connection,
    compression: ParquetCompression,
}

impl ParquetConverter {
    /// Open an in-memory DuckDB connection
    pub fn new() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            compression: ParquetCompression::default(),
        })
    }

    /// Set the compression codec
    #[must_use]
    pub fn with_compression(mut self, compression: ParquetCompression) -> Self {
        self.compression = compression;
        self
    }

    /// `<dir>/<stem>.parquet` next to the input
    pub fn output_path_for(csv: &Path) -> PathBuf {
        csv.with_extension("parquet")
    }

    /// Convert `csv` to a Parquet file next to it
    pub fn convert(&self, csv: &Path) -> Result<ConversionReport> {
        self.convert_to(csv, &Self::output_path_for(csv))
    }

    /// Convert `csv` to Parquet at `output`
    pub fn convert_to(&self, csv: &Path, output: &Path) -> Result<ConversionReport> {
        validate_input(csv)?;

        let sql = format!(
            "COPY (SELECT * FROM read_csv_auto({})) TO {} (FORMAT PARQUET, COMPRESSION {});",
            sql_literal(csv),
            sql_literal(output),
            self.compression.as_sql()
        );
        debug!(%sql, "Running DuckDB export");

        info!(
            "Converting {} to Parquet format...",
            csv.file_name().unwrap_or_default().to_string_lossy()
        );
        self.conn.execute_batch(&sql)?;

        if !output.is_file() {
            return Err(Error::Other(format!(
                "Output file was not created: {}",
                output.display()
            )));
        }

        let bytes = std::fs::metadata(output)?.len();
        let summary = ParquetSummary::read(output)
            .with_context(|| format!("Reading schema of {}", output.display()))?;

        info!(
            output = %output.display(),
            rows = summary.num_rows,
            columns = summary.columns.len(),
            "Conversion successful"
        );

        Ok(ConversionReport {
            input: csv.to_path_buf(),
            output: output.to_path_buf(),
            bytes,
            summary,
        })
    }
}

impl std::fmt::Debug for ParquetConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParquetConverter")
            .field("compression", &self.compression)
            .finish_non_exhaustive()
    }
}

fn validate_input(csv: &Path) -> Result<()> {
    if !csv.exists() {
        return Err(Error::file_not_found(csv.display().to_string()));
    }
    if !csv.is_file() {
        return Err(Error::NotAFile {
            path: csv.display().to_string(),
        });
    }
    Ok(())
}

/// Single-quoted SQL string literal for a path
fn sql_literal(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', "''"))
}

#[cfg(test)]
mod literal_tests {
    use super::*;

    #[test]
    fn test_sql_literal_escapes_quotes() {
        assert_eq!(
            sql_literal(Path::new("/tmp/o'brien.csv")),
            "'/tmp/o''brien.csv'"
        );
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            ParquetConverter::output_path_for(Path::new("/data/report.csv")),
            PathBuf::from("/data/report.parquet")
        );
        assert_eq!(
            ParquetConverter::output_path_for(Path::new("report.v2.csv")),
            PathBuf::from("report.v2.parquet")
        );
    }
}
