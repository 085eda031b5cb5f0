//! Output sinks for the landing pipeline.
//!
//! - [`BatchSink`]: the storage write boundary
//! - [`LocalSink`]: filesystem implementation (Parquet or CSV part files)
//! - [`write_interim`] / [`write_malformed`]: the two zone writers
//! - [`read_partition`]: read back one interim partition

mod error;
mod local;
mod sink;
mod zones;

pub use error::{OutputError, Result};
pub use local::{DEFAULT_PARTITION_VALUE, LocalSink, partition_frame, write_frame};
pub use sink::{BatchSink, WriteResult};
pub use zones::{read_partition, tag_quarantined, write_interim, write_malformed};
