use std::collections::HashSet;

use landing_ingest::any_to_string;
use landing_model::columns::ID;
use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};

use crate::derive::record_instants;
use crate::error::{Result, TransformError};

/// Keep one record per `(id, timestamp)` key.
///
/// First-seen wins: the earliest row of each key survives and surviving rows
/// keep their input order. `id` compares by its text form, `timestamp` by
/// instant, so two encodings of the same moment are the same key.
pub fn dedupe_by_key(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    let ids = df
        .column(ID)
        .map_err(|_| TransformError::MissingColumn { column: ID })?;
    let instants = record_instants(df)?;

    let mut seen = HashSet::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());
    for (row, instant) in instants.into_iter().enumerate() {
        let id = any_to_string(ids.get(row).unwrap_or(AnyValue::Null));
        keep.push(seen.insert((id, instant)));
    }
    if keep.iter().all(|kept| *kept) {
        return Ok(df.clone());
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    Ok(df.filter(&mask)?)
}
