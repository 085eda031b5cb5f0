//! Source boundary of the pipeline.

use std::path::Path;

use landing_model::DataFormat;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::Result;
use crate::reader::read_location;

/// Reads a raw record batch from a landing location.
///
/// Implementations own connectivity and decoding; any error they return is
/// fatal to the run.
pub trait RecordSource {
    fn read_batch(&self, location: &str, format: DataFormat) -> Result<DataFrame>;
}

/// [`RecordSource`] over the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSource;

impl LocalSource {
    pub fn new() -> Self {
        Self
    }
}

impl RecordSource for LocalSource {
    fn read_batch(&self, location: &str, format: DataFormat) -> Result<DataFrame> {
        let df = read_location(Path::new(location), format)?;
        debug!(
            location,
            %format,
            rows = df.height(),
            columns = df.width(),
            "batch read"
        );
        Ok(df)
    }
}
