//! Date partitions for the interim zone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::columns::{DAY, MONTH, YEAR};

/// A `(year, month, day)` storage partition.
///
/// Rendered Hive-style as `year=2024/month=1/day=15` (no zero padding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatePartition {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DatePartition {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Relative storage path of this partition.
    pub fn relative_path(&self) -> String {
        format!(
            "{YEAR}={}/{MONTH}={}/{DAY}={}",
            self.year, self.month, self.day
        )
    }
}

impl fmt::Display for DatePartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_path())
    }
}
