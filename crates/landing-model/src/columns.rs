//! Column names for raw and derived record fields.

/// Record identifier.
pub const ID: &str = "id";
/// Event instant of the record.
pub const TIMESTAMP: &str = "timestamp";
/// Numeric measurement.
pub const VALUE: &str = "value";

/// Instant the batch was processed (RFC 3339, UTC).
pub const PROCESSED_TIMESTAMP: &str = "processed_timestamp";
/// Calendar date of `timestamp` (`YYYY-MM-DD`).
pub const DATE: &str = "date";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DAY: &str = "day";
/// `value` divided by [`NORMALIZATION_DIVISOR`].
pub const VALUE_NORMALIZED: &str = "value_normalized";
/// Provenance tag naming the zone the record was read from.
pub const SOURCE_CONTAINER: &str = "source_container";
/// Calendar date of the processing instant (`YYYY-MM-DD`).
pub const PROCESSING_DATE: &str = "processing_date";

/// Instant a malformed record was quarantined (RFC 3339, UTC).
pub const ERROR_TIMESTAMP: &str = "error_timestamp";

/// Interim partition columns, outermost first.
pub const PARTITION_COLUMNS: [&str; 3] = [YEAR, MONTH, DAY];

/// Every column the transformer adds to a valid record.
pub const DERIVED: [&str; 8] = [
    PROCESSED_TIMESTAMP,
    DATE,
    YEAR,
    MONTH,
    DAY,
    VALUE_NORMALIZED,
    SOURCE_CONTAINER,
    PROCESSING_DATE,
];

pub const NORMALIZATION_DIVISOR: f64 = 100.0;

/// Default provenance tag for records read from the landing zone.
pub const DEFAULT_SOURCE_CONTAINER: &str = "landing";
