//! Parquet and CSV batch reading.

use std::fs::File;
use std::path::Path;

use landing_model::DataFormat;
use polars::prelude::{
    CsvReadOptions, DataFrame, IntoLazy, LazyFrame, ParquetReader, SerReader, UnionArgs, concat,
};

use crate::discovery::list_batch_files;
use crate::error::{IngestError, Result};

/// Reads a single batch file into a DataFrame.
pub fn read_batch_file(path: &Path, format: DataFormat) -> Result<DataFrame> {
    let decode_error = |message: String| IngestError::Decode {
        path: path.to_path_buf(),
        format,
        message,
    };

    match format {
        DataFormat::Parquet => {
            let file = File::open(path).map_err(|e| IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            ParquetReader::new(file)
                .finish()
                .map_err(|e| decode_error(e.to_string()))
        }
        DataFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| decode_error(e.to_string()))?
            .finish()
            .map_err(|e| decode_error(e.to_string())),
    }
}

/// Reads every batch file at `location` and stacks them into one frame.
///
/// A file location is read directly; a directory is scanned recursively
/// (see [`list_batch_files`]). All files must share column names and order;
/// differing column dtypes are unified to their supertype.
pub fn read_location(location: &Path, format: DataFormat) -> Result<DataFrame> {
    if location.is_file() {
        return read_batch_file(location, format);
    }
    if !location.exists() {
        return Err(IngestError::LocationNotFound {
            path: location.to_path_buf(),
        });
    }

    let files = list_batch_files(location, format)?;
    let mut files = files.into_iter();
    let Some(first) = files.next() else {
        return Err(IngestError::NoBatchFiles {
            path: location.to_path_buf(),
            format,
        });
    };

    let mut frames: Vec<LazyFrame> = vec![read_batch_file(&first, format)?.lazy()];
    for path in files {
        frames.push(read_batch_file(&path, format)?.lazy());
    }
    // Column dtypes are widened to their common supertype (Int64 + Float64 -> Float64).
    let args = UnionArgs {
        to_supertypes: true,
        ..Default::default()
    };
    concat(frames, args)
        .and_then(LazyFrame::collect)
        .map_err(|e| IngestError::SchemaMismatch {
            path: location.to_path_buf(),
            message: e.to_string(),
        })
}
