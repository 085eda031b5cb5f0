//! Column derivations for valid records.
//!
//! Each function takes a frame and returns a new frame with one group of
//! derived columns added. A derived column that already exists is replaced,
//! so applying a step twice yields the same frame.

use chrono::{DateTime, Datelike, FixedOffset};
use landing_ingest::{any_to_f64, any_to_instant};
use landing_model::columns::{
    DATE, DAY, MONTH, NORMALIZATION_DIVISOR, PROCESSED_TIMESTAMP, PROCESSING_DATE,
    SOURCE_CONTAINER, TIMESTAMP, VALUE, VALUE_NORMALIZED, YEAR,
};
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};

use crate::context::TransformContext;
use crate::error::{Result, TransformError};

/// Read `timestamp` of every row as an instant.
///
/// An empty frame needs no `timestamp` column.
pub(crate) fn record_instants(df: &DataFrame) -> Result<Vec<DateTime<FixedOffset>>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }
    let column = df
        .column(TIMESTAMP)
        .map_err(|_| TransformError::MissingColumn { column: TIMESTAMP })?;
    (0..df.height())
        .map(|row| {
            let cell = column.get(row).unwrap_or(AnyValue::Null);
            any_to_instant(cell).ok_or(TransformError::InvalidRecord {
                row,
                column: TIMESTAMP,
                reason: "is not a readable instant",
            })
        })
        .collect()
}

/// Add `processed_timestamp`, identical for every row.
pub fn add_processed_timestamp(df: &DataFrame, ctx: &TransformContext) -> Result<DataFrame> {
    let stamp = ctx.processed_timestamp();
    let values = vec![stamp; df.height()];
    let mut out = df.clone();
    out.with_column(Series::new(PROCESSED_TIMESTAMP.into(), values))?;
    Ok(out)
}

/// Add `date`, `year`, `month`, `day` from each record's `timestamp`.
///
/// Calendar fields use the offset the timestamp carries; no conversion is
/// applied.
pub fn derive_date_parts(df: &DataFrame) -> Result<DataFrame> {
    let instants = record_instants(df)?;

    let mut dates = Vec::with_capacity(instants.len());
    let mut years = Vec::with_capacity(instants.len());
    let mut months = Vec::with_capacity(instants.len());
    let mut days = Vec::with_capacity(instants.len());
    for instant in &instants {
        let date = instant.date_naive();
        dates.push(date.format("%Y-%m-%d").to_string());
        years.push(date.year());
        months.push(date.month() as i32);
        days.push(date.day() as i32);
    }

    let mut out = df.clone();
    out.with_column(Series::new(DATE.into(), dates))?;
    out.with_column(Series::new(YEAR.into(), years))?;
    out.with_column(Series::new(MONTH.into(), months))?;
    out.with_column(Series::new(DAY.into(), days))?;
    Ok(out)
}

/// Normalize one value.
///
/// Plain IEEE-754 division: never panics, `+inf` stays `+inf`.
pub fn normalize(value: f64) -> f64 {
    value / NORMALIZATION_DIVISOR
}

/// Add `value_normalized = value / 100.0`.
pub fn normalize_value(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        let mut out = df.clone();
        out.with_column(Series::new(VALUE_NORMALIZED.into(), Vec::<f64>::new()))?;
        return Ok(out);
    }
    let column = df
        .column(VALUE)
        .map_err(|_| TransformError::MissingColumn { column: VALUE })?;
    let normalized = (0..df.height())
        .map(|row| {
            let cell = column.get(row).unwrap_or(AnyValue::Null);
            any_to_f64(cell)
                .map(normalize)
                .ok_or(TransformError::InvalidRecord {
                    row,
                    column: VALUE,
                    reason: "is not numeric",
                })
        })
        .collect::<Result<Vec<f64>>>()?;

    let mut out = df.clone();
    out.with_column(Series::new(VALUE_NORMALIZED.into(), normalized))?;
    Ok(out)
}

/// Add the lineage tags `source_container` and `processing_date`.
pub fn stamp_lineage(df: &DataFrame, ctx: &TransformContext) -> Result<DataFrame> {
    let height = df.height();
    let container = vec![ctx.source_container.clone(); height];
    let processing_date = vec![ctx.processing_date().format("%Y-%m-%d").to_string(); height];

    let mut out = df.clone();
    out.with_column(Series::new(SOURCE_CONTAINER.into(), container))?;
    out.with_column(Series::new(PROCESSING_DATE.into(), processing_date))?;
    Ok(out)
}
