//! Transformation of valid landing records.
//!
//! - **context**: the per-run processing instant and provenance tag
//! - **derive**: date parts, value normalization, lineage columns
//! - **dedupe**: first-seen deduplication by `(id, timestamp)`
//!
//! [`transform`] composes these in a fixed order over an immutable input
//! frame and returns a new frame.

pub mod context;
mod dedupe;
pub mod derive;
mod error;

use polars::prelude::DataFrame;
use tracing::debug;

pub use context::TransformContext;
pub use dedupe::dedupe_by_key;
pub use derive::{
    add_processed_timestamp, derive_date_parts, normalize, normalize_value, stamp_lineage,
};
pub use error::{Result, TransformError};

/// Enrich and deduplicate a batch of valid records.
///
/// Steps, in order: processing timestamp, date parts, normalized value,
/// lineage tags, deduplication. The output never has more rows than the
/// input and its `(id, timestamp)` keys are unique.
pub fn transform(valid: &DataFrame, ctx: &TransformContext) -> Result<DataFrame> {
    let df = add_processed_timestamp(valid, ctx)?;
    let df = derive_date_parts(&df)?;
    let df = normalize_value(&df)?;
    let df = stamp_lineage(&df, ctx)?;
    let deduped = dedupe_by_key(&df)?;
    debug!(
        input_rows = valid.height(),
        output_rows = deduped.height(),
        duplicates = valid.height() - deduped.height(),
        "transform complete"
    );
    Ok(deduped)
}
