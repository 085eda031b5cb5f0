//! Shared types for the landing pipeline.
//!
//! - **columns**: record column names and derived-field constants
//! - **config**: explicit pipeline configuration (`PipelineConfig`)
//! - **format**: storage formats and write modes
//! - **partition**: `(year, month, day)` storage partitions
//! - **summary**: run summary and the serialized run result

pub mod columns;
pub mod config;
pub mod error;
pub mod format;
pub mod partition;
pub mod summary;

pub use config::PipelineConfig;
pub use error::{ConfigError, Result};
pub use format::{DataFormat, WriteMode};
pub use partition::DatePartition;
pub use summary::{RunResult, RunStatus, RunSummary, RunWarning, summarize};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn summary_counts_add_up() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let summary = summarize(10, 7, 3, now);
        assert_eq!(summary.total_records, 10);
        assert_eq!(summary.valid_records + summary.malformed_records, 10);
        assert!(summary.is_consistent());
    }

    #[test]
    fn run_result_serializes() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let result = RunResult::success(summarize(2, 1, 1, now), Vec::new());
        let json = serde_json::to_string(&result).expect("serialize result");
        let round: RunResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round.status, RunStatus::Success);
        assert_eq!(round.summary.map(|s| s.total_records), Some(2));
    }
}
