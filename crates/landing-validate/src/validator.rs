//! Batch validation and valid/malformed routing.

use landing_model::columns::{ID, TIMESTAMP, VALUE};
use polars::prelude::{AnyValue, BooleanChunked, Column, DataFrame, NewChunkedArray};
use serde::Serialize;

use crate::error::Result;
use crate::rules::{RecordCheck, Rule, check_record};

/// Per-rule failure counts for one batch.
///
/// A record breaking several rules is counted under each of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuleViolations {
    pub missing_id: usize,
    pub missing_timestamp: usize,
    pub missing_value: usize,
    pub negative_value: usize,
}

impl RuleViolations {
    fn record(&mut self, check: &RecordCheck) {
        for rule in check.failed_rules() {
            match rule {
                Rule::IdPresent => self.missing_id += 1,
                Rule::TimestampPresent => self.missing_timestamp += 1,
                Rule::ValuePresent => self.missing_value += 1,
                Rule::ValueNonNegative => self.negative_value += 1,
            }
        }
    }

    pub fn count(&self, rule: Rule) -> usize {
        match rule {
            Rule::IdPresent => self.missing_id,
            Rule::TimestampPresent => self.missing_timestamp,
            Rule::ValuePresent => self.missing_value,
            Rule::ValueNonNegative => self.negative_value,
        }
    }
}

/// A batch split into valid and invalid records.
///
/// Both frames keep the input schema and the relative input order.
#[derive(Debug, Clone)]
pub struct ValidationSplit {
    pub valid: DataFrame,
    pub invalid: DataFrame,
    pub violations: RuleViolations,
}

impl ValidationSplit {
    pub fn total(&self) -> usize {
        self.valid.height() + self.invalid.height()
    }
}

/// Evaluate every record in `batch`.
///
/// Returns one check per row. A required column absent from the batch makes
/// its rule fail for every row.
pub fn check_batch(batch: &DataFrame) -> Vec<RecordCheck> {
    let id = batch.column(ID).ok();
    let timestamp = batch.column(TIMESTAMP).ok();
    let value = batch.column(VALUE).ok();

    (0..batch.height())
        .map(|idx| {
            check_record(
                &cell(id, idx),
                &cell(timestamp, idx),
                &cell(value, idx),
            )
        })
        .collect()
}

fn cell(column: Option<&Column>, idx: usize) -> AnyValue<'_> {
    column
        .and_then(|col| col.get(idx).ok())
        .unwrap_or(AnyValue::Null)
}

/// Split `batch` into valid and invalid records.
///
/// Every input row lands in exactly one output. Missing fields are an
/// invalid outcome, never an error; errors come only from the dataframe
/// engine itself.
pub fn validate(batch: &DataFrame) -> Result<ValidationSplit> {
    let checks = check_batch(batch);

    let mut violations = RuleViolations::default();
    let mut keep = Vec::with_capacity(checks.len());
    let mut reject = Vec::with_capacity(checks.len());
    for check in &checks {
        let valid = check.is_valid();
        if !valid {
            violations.record(check);
        }
        keep.push(valid);
        reject.push(!valid);
    }

    let valid_mask = BooleanChunked::from_slice("is_valid".into(), &keep);
    let invalid_mask = BooleanChunked::from_slice("is_invalid".into(), &reject);
    Ok(ValidationSplit {
        valid: batch.filter(&valid_mask)?,
        invalid: batch.filter(&invalid_mask)?,
        violations,
    })
}
