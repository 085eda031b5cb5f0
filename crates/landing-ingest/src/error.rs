//! Error types for landing zone ingestion.

use std::path::PathBuf;

use landing_model::DataFormat;
use thiserror::Error;

/// Errors raised while reading a batch from the landing zone.
///
/// Every variant is fatal to a pipeline run.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source location does not exist.
    #[error("source location not found: {path}")]
    LocationNotFound { path: PathBuf },

    /// Source directory holds no file of the requested format.
    #[error("no {format} files found under {path}")]
    NoBatchFiles { path: PathBuf, format: DataFormat },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open a batch file.
    #[error("failed to open {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// File could not be decoded as the requested format.
    #[error("failed to decode {format} file {path}: {message}")]
    Decode {
        path: PathBuf,
        format: DataFormat,
        message: String,
    },

    /// Batch files disagree on their schema.
    #[error("schema of {path} does not match earlier batch files: {message}")]
    SchemaMismatch { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
