//! Record validation for landing batches.
//!
//! A record is valid when `id`, `timestamp` and `value` are all present and
//! `value >= 0`. [`validate`] routes each record of a batch into exactly one
//! of the valid or invalid frames.

mod error;
mod rules;
mod validator;

pub use error::{Result, ValidateError};
pub use rules::{RecordCheck, Rule, check_record};
pub use validator::{RuleViolations, ValidationSplit, check_batch, validate};
