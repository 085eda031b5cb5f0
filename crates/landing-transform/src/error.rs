//! Error types for record transformation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A required column is absent from the valid batch.
    #[error("column '{column}' not found in valid batch")]
    MissingColumn { column: &'static str },

    /// A record reached the transformer with a field it cannot interpret.
    ///
    /// Validation rejects such records, so this indicates a batch that was
    /// not validated first.
    #[error("row {row}: {column} {reason}")]
    InvalidRecord {
        row: usize,
        column: &'static str,
        reason: &'static str,
    },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
