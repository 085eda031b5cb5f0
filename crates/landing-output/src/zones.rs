//! Interim and malformed zone writers.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use landing_ingest::read_location;
use landing_model::columns::{ERROR_TIMESTAMP, PARTITION_COLUMNS};
use landing_model::{DataFormat, DatePartition, WriteMode};
use polars::prelude::{DataFrame, NamedFrom, Series};

use crate::error::{OutputError, Result};
use crate::sink::{BatchSink, WriteResult};

/// Write transformed records to the interim zone, partitioned by
/// `year/month/day`, appending to existing partitions.
///
/// An empty batch performs no write. Any sink error is returned unchanged.
pub fn write_interim(
    sink: &dyn BatchSink,
    records: &DataFrame,
    destination: &str,
) -> Result<WriteResult> {
    if records.height() == 0 {
        return Ok(WriteResult::empty(destination));
    }
    sink.write_batch(records, destination, &PARTITION_COLUMNS, WriteMode::Append)
}

/// Add `error_timestamp` to every invalid record.
pub fn tag_quarantined(records: &DataFrame, quarantined_at: DateTime<Utc>) -> Result<DataFrame> {
    let stamp = quarantined_at.to_rfc3339_opts(SecondsFormat::Micros, true);
    let mut out = records.clone();
    out.with_column(Series::new(
        ERROR_TIMESTAMP.into(),
        vec![stamp; records.height()],
    ))?;
    Ok(out)
}

/// Quarantine invalid records in the malformed zone (flat, append).
///
/// Writes whatever it is given; callers skip the call for an empty set.
pub fn write_malformed(
    sink: &dyn BatchSink,
    records: &DataFrame,
    destination: &str,
    quarantined_at: DateTime<Utc>,
) -> Result<WriteResult> {
    let tagged = tag_quarantined(records, quarantined_at)?;
    sink.write_batch(&tagged, destination, &[], WriteMode::Append)
}

/// Read back every record stored in one interim partition.
pub fn read_partition(
    interim_root: &Path,
    partition: DatePartition,
    format: DataFormat,
) -> Result<DataFrame> {
    let path = interim_root.join(partition.relative_path());
    read_location(&path, format).map_err(|source| OutputError::ReadBack { path, source })
}
