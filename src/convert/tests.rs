//! Tests for CSV to Parquet conversion

use super::*;
use crate::error::Error;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pretty_assertions::assert_eq;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn read_back_rows(path: &Path) -> usize {
    let file = File::open(path).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap();
    reader.map(|batch| batch.unwrap().num_rows()).sum()
}

#[test]
fn test_convert_round_trips_rows_and_columns() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(
        &dir,
        "costs.csv",
        "id,account,amount\n1,prod,10.5\n2,dev,2.25\n3,staging,0.75\n",
    );

    let converter = ParquetConverter::new().unwrap();
    let report = converter.convert(&csv).unwrap();

    assert_eq!(report.output, dir.path().join("costs.parquet"));
    assert!(report.output.is_file());
    assert!(report.bytes > 0);
    assert_eq!(report.summary.num_rows, 3);
    assert_eq!(report.summary.column_names(), vec!["id", "account", "amount"]);
    assert_eq!(report.summary.columns[0].data_type, DataType::Int64);
    assert_eq!(report.summary.columns[2].data_type, DataType::Float64);

    assert_eq!(read_back_rows(&report.output), 3);
}

#[test]
fn test_convert_with_zstd_to_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, "in.csv", "name,value\na,1\nb,2\n");
    let output = dir.path().join("nested-out.parquet");

    let converter = ParquetConverter::new()
        .unwrap()
        .with_compression(ParquetCompression::Zstd);
    let report = converter.convert_to(&csv, &output).unwrap();

    assert_eq!(report.output, output);
    assert_eq!(report.summary.num_rows, 2);
    assert_eq!(read_back_rows(&output), 2);
}

#[test]
fn test_convert_path_with_quote() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, "o'brien.csv", "x\n1\n");

    let report = ParquetConverter::new().unwrap().convert(&csv).unwrap();
    assert_eq!(report.output, dir.path().join("o'brien.parquet"));
    assert_eq!(report.summary.num_rows, 1);
}

#[test]
fn test_convert_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");

    let err = ParquetConverter::new().unwrap().convert(&missing).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

#[test]
fn test_convert_directory_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = ParquetConverter::new()
        .unwrap()
        .convert(dir.path())
        .unwrap_err();
    assert!(matches!(err, Error::NotAFile { .. }));
}

#[test]
fn test_convert_empty_file_never_invents_rows() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(&dir, "empty.csv", "");

    // DuckDB either rejects an empty CSV or writes an empty file
    match ParquetConverter::new().unwrap().convert(&csv) {
        Ok(report) => assert_eq!(report.summary.num_rows, 0),
        Err(err) => assert!(matches!(err, Error::Conversion(_))),
    }
}

#[test]
fn test_compression_sql_names() {
    assert_eq!(ParquetCompression::default(), ParquetCompression::Snappy);
    assert_eq!(ParquetCompression::Zstd.as_sql(), "zstd");
    assert_eq!(ParquetCompression::Uncompressed.as_sql(), "uncompressed");
}
