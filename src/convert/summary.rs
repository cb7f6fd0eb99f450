//! Parquet footer summary

use crate::error::Result;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

/// One column of a Parquet file
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub data_type: DataType,
}

/// Row count and columns of a Parquet file
#[derive(Debug, Clone, PartialEq)]
pub struct ParquetSummary {
    pub num_rows: i64,
    pub columns: Vec<ColumnSummary>,
}

impl ParquetSummary {
    /// Read the summary from the file footer without decoding any pages
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

        let num_rows = builder.metadata().file_metadata().num_rows();
        let columns = builder
            .schema()
            .fields()
            .iter()
            .map(|field| ColumnSummary {
                name: field.name().clone(),
                data_type: field.data_type().clone(),
            })
            .collect();

        Ok(Self { num_rows, columns })
    }

    /// Column names in file order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
