//! Tests for the local sink and zone writers.

use std::path::Path;

use chrono::{TimeZone, Utc};
use landing_model::{DataFormat, DatePartition, WriteMode};
use landing_output::{
    BatchSink, LocalSink, OutputError, read_partition, write_interim, write_malformed,
};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

fn interim_records(days: Vec<i32>) -> DataFrame {
    let n = days.len();
    let ids: Vec<String> = (0..n).map(|i| format!("r{i}")).collect();
    let values: Vec<f64> = (0..n).map(|i| i as f64 * 10.0).collect();
    let columns: Vec<Column> = vec![
        Series::new("id".into(), ids).into_column(),
        Series::new("value".into(), values).into_column(),
        Series::new("year".into(), vec![2024i32; n]).into_column(),
        Series::new("month".into(), vec![1i32; n]).into_column(),
        Series::new("day".into(), days).into_column(),
    ];
    DataFrame::new(columns).unwrap()
}

fn visible_files(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return names;
    };
    for entry in entries {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            names.extend(visible_files(&path));
        } else {
            names.push(path.display().to_string());
        }
    }
    names.sort();
    names
}

#[test]
fn test_interim_partition_holds_only_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().to_str().unwrap();
    let sink = LocalSink::new(DataFormat::Parquet);

    let result = write_interim(&sink, &interim_records(vec![15, 15, 16]), dest).unwrap();

    assert_eq!(result.rows_written, 3);
    assert_eq!(
        result.partitions,
        vec!["year=2024/month=1/day=15", "year=2024/month=1/day=16"]
    );
    let day15 =
        read_partition(dir.path(), DatePartition::new(2024, 1, 15), DataFormat::Parquet).unwrap();
    assert_eq!(day15.height(), 2);
    let days = day15.column("day").unwrap().i32().unwrap();
    assert!(days.into_iter().all(|d| d == Some(15)));
}

#[test]
fn test_interim_append_keeps_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().to_str().unwrap();
    let partition = DatePartition::new(2024, 1, 15);

    let first = LocalSink::new(DataFormat::Parquet);
    write_interim(&first, &interim_records(vec![15]), dest).unwrap();
    let second = LocalSink::new(DataFormat::Parquet);
    write_interim(&second, &interim_records(vec![15, 15]), dest).unwrap();

    let files = visible_files(&dir.path().join(partition.relative_path()));
    assert_eq!(files.len(), 2);
    let df = read_partition(dir.path(), partition, DataFormat::Parquet).unwrap();
    assert_eq!(df.height(), 3);
}

#[test]
fn test_interim_skips_empty_batch() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("interim");
    let sink = LocalSink::new(DataFormat::Parquet);

    let result = write_interim(&sink, &interim_records(Vec::new()), dest.to_str().unwrap()).unwrap();

    assert_eq!(result.rows_written, 0);
    assert!(result.files.is_empty());
    assert!(!dest.exists());
}

#[test]
fn test_interim_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let sink = LocalSink::new(DataFormat::Csv);

    let result =
        write_interim(&sink, &interim_records(vec![20]), dir.path().to_str().unwrap()).unwrap();

    assert_eq!(result.files.len(), 1);
    assert!(result.files[0].ends_with(".csv"));
    let df = read_partition(dir.path(), DatePartition::new(2024, 1, 20), DataFormat::Csv).unwrap();
    assert_eq!(df.height(), 1);
    assert_eq!(df.column("id").unwrap().str().unwrap().get(0), Some("r0"));
}

#[test]
fn test_missing_partition_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let sink = LocalSink::new(DataFormat::Parquet);
    let df = interim_records(vec![15]).drop("day").unwrap();

    let err = write_interim(&sink, &df, dir.path().to_str().unwrap()).unwrap_err();

    assert!(matches!(err, OutputError::MissingPartitionColumn { ref column } if column == "day"));
    assert!(visible_files(dir.path()).is_empty());
}

#[test]
fn test_failed_write_leaves_no_visible_files() {
    let dir = tempfile::tempdir().unwrap();
    // A plain file where the day=16 directory should go.
    let blocked = dir.path().join("year=2024/month=1");
    std::fs::create_dir_all(&blocked).unwrap();
    std::fs::write(blocked.join("day=16"), b"not a directory").unwrap();
    let sink = LocalSink::new(DataFormat::Parquet);

    let result = write_interim(&sink, &interim_records(vec![15, 16]), dir.path().to_str().unwrap());

    assert!(matches!(result, Err(OutputError::CreateDir { .. })));
    assert!(visible_files(&blocked.join("day=15")).is_empty());
}

#[test]
fn test_malformed_write_is_flat_and_tagged() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("malformed");
    let sink = LocalSink::with_run_id(DataFormat::Parquet, "run1");
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let invalid = DataFrame::new(vec![
        Series::new("id".into(), vec![Some("3"), None]).into_column(),
        Series::new("value".into(), vec![-1.0, 5.0]).into_column(),
    ])
    .unwrap();

    let result = write_malformed(&sink, &invalid, dest.to_str().unwrap(), at).unwrap();

    assert!(result.partitions.is_empty());
    assert_eq!(
        result.files,
        vec![dest.join("part-run1-00000.parquet").display().to_string()]
    );
    let df = landing_ingest::read_location(&dest, DataFormat::Parquet).unwrap();
    assert_eq!(df.height(), 2);
    assert_eq!(
        df.column("error_timestamp").unwrap().str().unwrap().get(1),
        Some("2024-01-15T12:00:00.000000Z")
    );
    assert_eq!(df.column("id").unwrap().str().unwrap().get(1), None);
}

#[test]
fn test_part_names_are_unique_per_sink() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().to_str().unwrap();
    let sink = LocalSink::with_run_id(DataFormat::Parquet, "abc");
    let df = interim_records(vec![1]).drop_many(["year", "month", "day"]);

    let a = sink.write_batch(&df, dest, &[], WriteMode::Append).unwrap();
    let b = sink.write_batch(&df, dest, &[], WriteMode::Append).unwrap();

    assert_ne!(a.files, b.files);
    assert_eq!(visible_files(dir.path()).len(), 2);
}
