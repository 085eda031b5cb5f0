//! The record validity predicate.

use std::fmt;

use landing_ingest::{any_to_f64, any_to_instant};
use polars::prelude::AnyValue;
use serde::Serialize;

/// A single validity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// `id` is present.
    IdPresent,
    /// `timestamp` is present and readable as an instant.
    TimestampPresent,
    /// `value` is present and numeric.
    ValuePresent,
    /// `value >= 0`.
    ValueNonNegative,
}

impl Rule {
    pub const ALL: [Rule; 4] = [
        Self::IdPresent,
        Self::TimestampPresent,
        Self::ValuePresent,
        Self::ValueNonNegative,
    ];

    pub const fn description(&self) -> &'static str {
        match self {
            Self::IdPresent => "id is missing",
            Self::TimestampPresent => "timestamp is missing or unreadable",
            Self::ValuePresent => "value is missing or not numeric",
            Self::ValueNonNegative => "value is negative",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of every rule for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCheck {
    pub id_present: bool,
    pub timestamp_present: bool,
    pub value_present: bool,
    /// False when `value` is absent, negative, or NaN.
    pub value_non_negative: bool,
}

impl RecordCheck {
    /// A record is valid only if every rule holds.
    pub fn is_valid(&self) -> bool {
        self.id_present && self.timestamp_present && self.value_present && self.value_non_negative
    }

    /// Rules this record breaks, in [`Rule::ALL`] order.
    ///
    /// An absent value reports [`Rule::ValuePresent`] only.
    pub fn failed_rules(&self) -> Vec<Rule> {
        let mut failed = Vec::new();
        if !self.id_present {
            failed.push(Rule::IdPresent);
        }
        if !self.timestamp_present {
            failed.push(Rule::TimestampPresent);
        }
        if !self.value_present {
            failed.push(Rule::ValuePresent);
        } else if !self.value_non_negative {
            failed.push(Rule::ValueNonNegative);
        }
        failed
    }
}

/// Evaluate the validity rules for one record's cells.
///
/// Pure: the result depends only on these three cells.
pub fn check_record(id: &AnyValue<'_>, timestamp: &AnyValue<'_>, value: &AnyValue<'_>) -> RecordCheck {
    let value = any_to_f64(value.clone());
    RecordCheck {
        id_present: !matches!(id, AnyValue::Null),
        timestamp_present: any_to_instant(timestamp.clone()).is_some(),
        value_present: value.is_some(),
        // NaN compares false and is rejected here.
        value_non_negative: value.is_some_and(|v| v >= 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_present_and_non_negative_is_valid() {
        let check = check_record(
            &AnyValue::Int64(1),
            &AnyValue::String("2024-01-15T10:00:00Z"),
            &AnyValue::Int64(0),
        );
        assert!(check.is_valid());
        assert!(check.failed_rules().is_empty());
    }

    #[test]
    fn negative_value_fails_one_rule() {
        let check = check_record(
            &AnyValue::Int64(2),
            &AnyValue::String("2024-01-15T10:00:00Z"),
            &AnyValue::Float64(-5.0),
        );
        assert!(!check.is_valid());
        assert_eq!(check.failed_rules(), vec![Rule::ValueNonNegative]);
    }

    #[test]
    fn blank_id_is_present() {
        for id in [AnyValue::String(""), AnyValue::String("  ")] {
            let check = check_record(
                &id,
                &AnyValue::String("2024-01-15T10:00:00Z"),
                &AnyValue::Float64(1.0),
            );
            assert!(check.id_present);
            assert!(check.is_valid());
        }
    }

    #[test]
    fn missing_value_is_not_reported_as_negative() {
        let check = check_record(&AnyValue::Null, &AnyValue::Null, &AnyValue::Null);
        assert_eq!(
            check.failed_rules(),
            vec![Rule::IdPresent, Rule::TimestampPresent, Rule::ValuePresent]
        );
    }

    #[test]
    fn nan_value_is_invalid() {
        let check = check_record(
            &AnyValue::Int64(1),
            &AnyValue::String("2024-01-15"),
            &AnyValue::Float64(f64::NAN),
        );
        assert!(check.value_present);
        assert!(!check.is_valid());
    }

    #[test]
    fn unreadable_timestamp_is_invalid() {
        let check = check_record(
            &AnyValue::String("a"),
            &AnyValue::String("not a time"),
            &AnyValue::Int64(1),
        );
        assert!(!check.timestamp_present);
        assert!(!check.is_valid());
    }
}
