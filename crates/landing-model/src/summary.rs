//! Run summary and the externally visible run result.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counts for one pipeline run, captured once at the end of the run.
///
/// `valid_records` is the size of the valid partition *before*
/// deduplication, so `valid_records + malformed_records == total_records`
/// always holds for a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_records: usize,
    pub valid_records: usize,
    pub malformed_records: usize,
    pub processed_timestamp: DateTime<Utc>,
}

impl RunSummary {
    /// Returns true if the valid and malformed counts cover the total.
    pub fn is_consistent(&self) -> bool {
        self.valid_records + self.malformed_records == self.total_records
    }
}

/// Build the summary snapshot for a run.
pub fn summarize(
    total: usize,
    valid_count: usize,
    malformed_count: usize,
    now: DateTime<Utc>,
) -> RunSummary {
    RunSummary {
        total_records: total,
        valid_records: valid_count,
        malformed_records: malformed_count,
        processed_timestamp: now,
    }
}

/// Non-fatal problem observed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// Quarantine write failed; malformed records of this run were not persisted.
    MalformedWrite {
        destination: String,
        records: usize,
        message: String,
    },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedWrite {
                destination,
                records,
                message,
            } => write!(
                f,
                "failed to quarantine {records} malformed record(s) to {destination}: {message}"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Failure,
}

/// Result handed back to whatever invoked the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RunWarning>,
    /// Rows persisted to the interim zone (after deduplication).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub written_records: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interim_partitions: Vec<String>,
}

impl RunResult {
    pub fn success(summary: RunSummary, warnings: Vec<RunWarning>) -> Self {
        Self {
            status: RunStatus::Success,
            summary: Some(summary),
            error: None,
            warnings,
            written_records: None,
            interim_partitions: Vec::new(),
        }
    }

    /// Attach what the interim write persisted.
    #[must_use]
    pub fn with_interim_output(mut self, written_records: usize, partitions: Vec<String>) -> Self {
        self.written_records = Some(written_records);
        self.interim_partitions = partitions;
        self
    }

    /// Failed runs never carry a summary.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Failure,
            summary: None,
            error: Some(error.into()),
            warnings: Vec::new(),
            written_records: None,
            interim_partitions: Vec::new(),
        }
    }
}
