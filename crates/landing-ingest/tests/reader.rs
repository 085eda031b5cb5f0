//! Integration tests for landing zone reading.

use std::fs::File;

use landing_ingest::{IngestError, LocalSource, RecordSource, read_location};
use landing_model::DataFormat;
use polars::prelude::{DataFrame, DataType, NamedFrom, ParquetWriter, Series};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, body: &str) {
    std::fs::write(dir.path().join(name), body).unwrap();
}

#[test]
fn test_read_single_csv_file() {
    let dir = TempDir::new().unwrap();
    write_csv(
        &dir,
        "batch.csv",
        "id,timestamp,value\n1,2024-01-15T10:00:00Z,50\n2,2024-01-15T11:00:00Z,-5\n",
    );

    let df = read_location(&dir.path().join("batch.csv"), DataFormat::Csv).unwrap();

    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 3);
    assert!(df.column("timestamp").is_ok());
}

#[test]
fn test_read_directory_stacks_files_in_path_order() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, "b.csv", "id,timestamp,value\n2,2024-01-16,20\n");
    write_csv(&dir, "a.csv", "id,timestamp,value\n1,2024-01-15,10\n");

    let df = LocalSource::new()
        .read_batch(dir.path().to_str().unwrap(), DataFormat::Csv)
        .unwrap();

    assert_eq!(df.height(), 2);
    let ids = df.column("id").unwrap().i64().unwrap();
    assert_eq!(ids.get(0), Some(1));
    assert_eq!(ids.get(1), Some(2));
}

#[test]
fn test_read_directory_widens_integer_and_float_columns() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, "a.csv", "id,timestamp,value\n1,2024-01-15,50\n");
    write_csv(&dir, "b.csv", "id,timestamp,value\n2,2024-01-16,12.5\n");

    let df = read_location(dir.path(), DataFormat::Csv).unwrap();

    assert_eq!(df.height(), 2);
    let values = df.column("value").unwrap();
    assert_eq!(values.dtype(), &DataType::Float64);
    let values = values.f64().unwrap();
    assert_eq!(values.get(0), Some(50.0));
    assert_eq!(values.get(1), Some(12.5));
}

#[test]
fn test_read_directory_with_different_columns_is_error() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, "a.csv", "id,timestamp,value\n1,2024-01-15,50\n");
    write_csv(&dir, "b.csv", "id,reading\n2,12.5\n");

    let err = read_location(dir.path(), DataFormat::Csv).unwrap_err();

    assert!(matches!(err, IngestError::SchemaMismatch { .. }));
}

#[test]
fn test_read_parquet_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("part-0.parquet");
    let mut df = DataFrame::new(vec![
        Series::new("id".into(), vec![1i64, 2, 3]).into(),
        Series::new("timestamp".into(), vec!["2024-01-15", "2024-01-15", "2024-01-16"]).into(),
        Series::new("value".into(), vec![1.0f64, 2.0, 3.0]).into(),
    ])
    .unwrap();
    let mut file = File::create(&path).unwrap();
    ParquetWriter::new(&mut file).finish(&mut df).unwrap();

    let read = LocalSource::new()
        .read_batch(dir.path().to_str().unwrap(), DataFormat::Parquet)
        .unwrap();

    assert_eq!(read.height(), 3);
    assert!(read.equals(&df));
}

#[test]
fn test_missing_location_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nowhere");

    let err = read_location(&missing, DataFormat::Parquet).unwrap_err();

    assert!(matches!(err, IngestError::LocationNotFound { .. }));
}

#[test]
fn test_directory_without_matching_files_is_error() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, "batch.csv", "id,timestamp,value\n1,2024-01-15,10\n");

    let err = read_location(dir.path(), DataFormat::Parquet).unwrap_err();

    assert!(matches!(err, IngestError::NoBatchFiles { .. }));
}

#[test]
fn test_undecodable_parquet_is_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.parquet"), b"not parquet").unwrap();

    let err = read_location(dir.path(), DataFormat::Parquet).unwrap_err();

    assert!(matches!(err, IngestError::Decode { .. }));
}
