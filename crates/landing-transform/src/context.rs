//! Per-run transformation context.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use landing_model::columns::DEFAULT_SOURCE_CONTAINER;

/// Values shared by every record transformed in one run.
///
/// The processing instant is captured once so all records of a batch carry
/// the same `processed_timestamp` and `processing_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformContext {
    pub processed_at: DateTime<Utc>,
    pub source_container: String,
}

impl TransformContext {
    pub fn new(processed_at: DateTime<Utc>) -> Self {
        Self {
            processed_at,
            source_container: DEFAULT_SOURCE_CONTAINER.to_string(),
        }
    }

    /// Context stamped with the current instant.
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    #[must_use]
    pub fn with_source_container(mut self, container: impl Into<String>) -> Self {
        self.source_container = container.into();
        self
    }

    /// `processed_timestamp` cell value.
    pub fn processed_timestamp(&self) -> String {
        self.processed_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Calendar date of the processing instant (UTC).
    pub fn processing_date(&self) -> NaiveDate {
        self.processed_at.date_naive()
    }
}
