//! Error types for sink writes.

use std::path::PathBuf;

use landing_ingest::IngestError;
use landing_model::DataFormat;
use thiserror::Error;

/// Errors raised by a [`crate::BatchSink`] or the zone writers.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Destination directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A part file could not be created or written.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The frame could not be encoded.
    #[error("failed to encode {format} file {path}: {message}")]
    Encode {
        path: PathBuf,
        format: DataFormat,
        message: String,
    },

    /// Staged files could not be moved into place.
    #[error("failed to commit {path}: {source}")]
    Commit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A partition column is absent from the frame.
    #[error("partition column '{column}' not found in batch")]
    MissingPartitionColumn { column: String },

    /// Written data could not be read back.
    #[error("failed to read back {path}: {source}")]
    ReadBack {
        path: PathBuf,
        #[source]
        source: IngestError,
    },

    /// Sink-specific failure reported by a non-filesystem implementation.
    #[error("{0}")]
    Sink(String),

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
