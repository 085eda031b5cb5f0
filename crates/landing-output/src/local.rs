//! Filesystem sink with staged, all-or-nothing commits.
//!
//! Each write call stages one part file per partition under a hidden
//! `.part-*.tmp` name. Only when every partition has been staged are the
//! files renamed into place; any failure removes what this call staged or
//! committed, so a failed write leaves no new visible files.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use landing_ingest::any_to_string;
use landing_model::{DataFormat, WriteMode};
use polars::prelude::{
    AnyValue, BooleanChunked, CsvWriter, DataFrame, NewChunkedArray, ParquetWriter, SerWriter,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{OutputError, Result};
use crate::sink::{BatchSink, WriteResult};

/// Directory value used for null or blank partition cells.
pub const DEFAULT_PARTITION_VALUE: &str = "__HIVE_DEFAULT_PARTITION__";

/// [`BatchSink`] writing Parquet or CSV part files to local directories.
#[derive(Debug)]
pub struct LocalSink {
    format: DataFormat,
    run_id: String,
    next_part: AtomicUsize,
}

impl LocalSink {
    /// Create a sink with a fresh run id for part file names.
    pub fn new(format: DataFormat) -> Self {
        Self::with_run_id(format, Uuid::new_v4().simple().to_string())
    }

    pub fn with_run_id(format: DataFormat, run_id: impl Into<String>) -> Self {
        Self {
            format,
            run_id: run_id.into(),
            next_part: AtomicUsize::new(0),
        }
    }

    fn part_file_name(&self) -> String {
        let part = self.next_part.fetch_add(1, Ordering::Relaxed);
        format!("part-{}-{part:05}.{}", self.run_id, self.format.extension())
    }
}

impl BatchSink for LocalSink {
    fn write_batch(
        &self,
        frame: &DataFrame,
        destination: &str,
        partition_by: &[&str],
        mode: WriteMode,
    ) -> Result<WriteResult> {
        let WriteMode::Append = mode;
        let root = Path::new(destination);

        let groups = partition_frame(frame, partition_by)?;
        let mut staged = Vec::with_capacity(groups.len());
        let mut partitions = Vec::new();
        for (relative, group) in groups {
            let dir = if relative.is_empty() {
                root.to_path_buf()
            } else {
                root.join(&relative)
            };
            let name = self.part_file_name();
            let target = dir.join(&name);
            let temp = dir.join(format!(".{name}.tmp"));
            let result = std::fs::create_dir_all(&dir)
                .map_err(|source| OutputError::CreateDir {
                    path: dir.clone(),
                    source,
                })
                .and_then(|()| write_frame(&temp, &group, self.format));
            if let Err(error) = result {
                let mut abandoned: Vec<PathBuf> =
                    staged.into_iter().map(|(temp, _)| temp).collect();
                abandoned.push(temp);
                remove_files(&abandoned);
                return Err(error);
            }
            staged.push((temp, target));
            if !relative.is_empty() {
                partitions.push(relative);
            }
        }

        let files = commit(staged)?;
        debug!(
            destination,
            rows = frame.height(),
            files = files.len(),
            "batch written"
        );
        Ok(WriteResult {
            destination: destination.to_string(),
            rows_written: frame.height(),
            files: files.iter().map(|p| p.display().to_string()).collect(),
            partitions,
        })
    }
}

/// Group rows by the values of `partition_by`.
///
/// Returns `(relative_path, rows)` pairs ordered by partition values. An
/// empty `partition_by` yields a single group with an empty path.
pub fn partition_frame(frame: &DataFrame, partition_by: &[&str]) -> Result<Vec<(String, DataFrame)>> {
    if partition_by.is_empty() {
        return Ok(vec![(String::new(), frame.clone())]);
    }

    let mut columns = Vec::with_capacity(partition_by.len());
    for name in partition_by {
        let column = frame
            .column(name)
            .map_err(|_| OutputError::MissingPartitionColumn {
                column: (*name).to_string(),
            })?;
        columns.push((*name, column));
    }

    let mut rows_by_key: BTreeMap<Vec<String>, Vec<usize>> = BTreeMap::new();
    for row in 0..frame.height() {
        let key = columns
            .iter()
            .map(|(_, column)| {
                let value = any_to_string(column.get(row).unwrap_or(AnyValue::Null));
                if value.trim().is_empty() {
                    DEFAULT_PARTITION_VALUE.to_string()
                } else {
                    value
                }
            })
            .collect();
        rows_by_key.entry(key).or_default().push(row);
    }

    let mut groups = Vec::with_capacity(rows_by_key.len());
    for (key, rows) in rows_by_key {
        let mut keep = vec![false; frame.height()];
        for row in rows {
            keep[row] = true;
        }
        let mask = BooleanChunked::from_slice("partition".into(), &keep);
        let relative = partition_by
            .iter()
            .zip(&key)
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("/");
        groups.push((relative, frame.filter(&mask)?));
    }
    Ok(groups)
}

/// Encode `frame` into a new file at `path`.
pub fn write_frame(path: &Path, frame: &DataFrame, format: DataFormat) -> Result<()> {
    let mut file = File::create(path).map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut df = frame.clone();
    let encoded = match format {
        DataFormat::Parquet => ParquetWriter::new(&mut file).finish(&mut df).map(|_| ()),
        DataFormat::Csv => CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df),
    };
    encoded.map_err(|e| OutputError::Encode {
        path: path.to_path_buf(),
        format,
        message: e.to_string(),
    })?;
    file.sync_all().map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Rename staged files into place, undoing everything on the first failure.
fn commit(staged: Vec<(PathBuf, PathBuf)>) -> Result<Vec<PathBuf>> {
    let mut committed: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (idx, (temp, target)) in staged.iter().enumerate() {
        if let Err(source) = std::fs::rename(temp, target) {
            remove_files(&committed);
            let pending: Vec<PathBuf> = staged[idx..].iter().map(|(temp, _)| temp.clone()).collect();
            remove_files(&pending);
            return Err(OutputError::Commit {
                path: target.clone(),
                source,
            });
        }
        committed.push(target.clone());
    }
    Ok(committed)
}

fn remove_files(paths: &[PathBuf]) {
    for path in paths {
        if let Err(error) = std::fs::remove_file(path)
            && error.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %path.display(), %error, "failed to remove staged file");
        }
    }
}
