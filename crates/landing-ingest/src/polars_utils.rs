//! Polars AnyValue utility functions.
//!
//! Record fields arrive with whatever dtype the reader inferred (a CSV
//! `value` may be `Int64`, `Float64` or text; a Parquet `timestamp` may be a
//! real `Datetime`). These helpers read a cell into the typed value the
//! pipeline needs and return `None` when the cell does not hold one.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use polars::prelude::{AnyValue, TimeUnit};

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => f64::from(v).to_string(),
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts an AnyValue to f64, returning None for non-numeric or null values.
///
/// Integers are widened; magnitudes above 2^53 lose precision.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Converts an AnyValue to an instant, returning None for null or unparseable cells.
///
/// Native `Datetime` cells are taken as UTC; `Date` cells as midnight UTC.
pub fn any_to_instant(value: AnyValue<'_>) -> Option<DateTime<FixedOffset>> {
    match value {
        AnyValue::Null => None,
        AnyValue::Datetime(v, unit, _) => {
            let utc = match unit {
                TimeUnit::Nanoseconds => Some(DateTime::<Utc>::from_timestamp_nanos(v)),
                TimeUnit::Microseconds => DateTime::<Utc>::from_timestamp_micros(v),
                TimeUnit::Milliseconds => DateTime::<Utc>::from_timestamp_millis(v),
            };
            utc.map(|instant| instant.fixed_offset())
        }
        AnyValue::Date(days) => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
            let date = epoch.checked_add_signed(TimeDelta::days(i64::from(days)))?;
            Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
        }
        AnyValue::String(s) => parse_instant(s),
        AnyValue::StringOwned(s) => parse_instant(&s),
        other => parse_instant(&other.to_string()),
    }
}

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a textual timestamp.
///
/// Accepts RFC 3339 (offset preserved), naive `YYYY-MM-DD[T ]HH:MM:SS[.f]`
/// and bare `YYYY-MM-DD`. Naive forms are read as UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant);
    }
    // Polars renders UTC-aware datetimes with a trailing zone name.
    let naive_text = trimmed.strip_suffix(" UTC").unwrap_or(trimmed);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    let date = NaiveDate::parse_from_str(naive_text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339_with_offset() {
        let instant = parse_instant("2024-01-15T23:30:00-05:00").unwrap();
        assert_eq!(instant.day(), 15);
        assert_eq!(instant.hour(), 23);
        assert_eq!(instant.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn parses_naive_forms_as_utc() {
        let spaced = parse_instant("2024-01-15 10:30:00").unwrap();
        let tee = parse_instant("2024-01-15T10:30:00.250").unwrap();
        let date_only = parse_instant("2024-01-15").unwrap();
        assert_eq!(spaced.offset().local_minus_utc(), 0);
        assert_eq!(tee.timestamp_subsec_millis(), 250);
        assert_eq!(date_only.hour(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_instant("").is_none());
        assert!(parse_instant("yesterday").is_none());
        assert!(parse_instant("2024-13-40").is_none());
    }

    #[test]
    fn reads_numbers_from_text_and_ints() {
        assert_eq!(any_to_f64(AnyValue::Int64(50)), Some(50.0));
        assert_eq!(any_to_f64(AnyValue::String(" 12.5 ")), Some(12.5));
        assert_eq!(any_to_f64(AnyValue::String("n/a")), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }

    #[test]
    fn reads_native_datetime() {
        let micros = 1_705_314_600_000_000; // 2024-01-15T10:30:00Z
        let instant = any_to_instant(AnyValue::Datetime(micros, TimeUnit::Microseconds, None))
            .unwrap();
        assert_eq!((instant.year(), instant.month(), instant.day()), (2024, 1, 15));
        assert_eq!(instant.hour(), 10);
    }
}
