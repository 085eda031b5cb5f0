//! Sink boundary of the pipeline.

use landing_model::WriteMode;
use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::Result;

/// What a sink persisted for one write call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteResult {
    pub destination: String,
    pub rows_written: usize,
    /// Locations of the part files added by this write.
    pub files: Vec<String>,
    /// Relative partition paths touched (`year=2024/month=1/day=15`).
    /// Empty for unpartitioned writes.
    pub partitions: Vec<String>,
}

impl WriteResult {
    /// Result of a write that had nothing to persist.
    pub fn empty(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }
}

/// Persists record batches to a storage location.
///
/// A write either persists every row of `frame` or returns an error; callers
/// decide whether that error is fatal.
pub trait BatchSink {
    /// Write `frame` under `destination`.
    ///
    /// With a non-empty `partition_by`, rows are grouped by the values of
    /// those columns and each group is stored under its own
    /// `col=value/...` path beneath `destination`.
    fn write_batch(
        &self,
        frame: &DataFrame,
        destination: &str,
        partition_by: &[&str],
        mode: WriteMode,
    ) -> Result<WriteResult>;
}
