//! Landing zone ingestion.
//!
//! This crate reads raw record batches into Polars DataFrames and provides
//! the cell-level helpers the rest of the pipeline uses to interpret them.
//!
//! # Features
//!
//! - **Source boundary**: [`RecordSource`] trait with a filesystem implementation
//! - **Discovery**: recursive listing of Parquet/CSV batch files
//! - **Value extraction**: typed reads of `AnyValue` cells (numbers, instants)
//!
//! # Example
//!
//! ```ignore
//! use landing_ingest::{LocalSource, RecordSource};
//! use landing_model::DataFormat;
//!
//! let batch = LocalSource::new().read_batch("/data/landing", DataFormat::Parquet)?;
//! ```

mod discovery;
mod error;
pub mod polars_utils;
mod reader;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use discovery::list_batch_files;
pub use reader::{read_batch_file, read_location};
pub use source::{LocalSource, RecordSource};

// === Value Extraction ===
pub use polars_utils::{
    any_to_f64, any_to_instant, any_to_string, parse_f64, parse_instant,
};
