use thiserror::Error;

/// Failure of the dataframe engine while routing records.
///
/// Rule failures are never errors; a record that breaks a rule is routed to
/// the invalid set.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ValidateError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidateError>;
