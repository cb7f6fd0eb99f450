//! CSV to Parquet conversion via DuckDB
//!
//! The conversion itself is a single DuckDB `COPY ... TO ... (FORMAT PARQUET)`
//! statement. Afterwards the Parquet footer is read back to report the row
//! count and columns that landed in the file.

mod converter;
mod summary;

pub use converter::{ConversionReport, ParquetCompression, ParquetConverter};
pub use summary::{ColumnSummary, ParquetSummary};

#[cfg(test)]
mod tests;
