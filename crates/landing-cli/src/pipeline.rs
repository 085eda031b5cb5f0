//! Landing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Read**: load the landing batch from the source location
//! 2. **Validate**: split records into valid and malformed sets
//! 3. **Transform**: enrich and deduplicate the valid records
//! 4. **Write interim**: append transformed records to date partitions
//! 5. **Write malformed**: quarantine invalid records (skipped when none)
//! 6. **Summarize**: capture run counts
//!
//! Read, validate, transform and interim-write failures end the run with a
//! [`PipelineError`] and no summary. A malformed-write failure is recorded
//! as a [`RunWarning`] and the run still completes.

use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use landing_ingest::{IngestError, RecordSource};
use landing_model::{PipelineConfig, RunResult, RunSummary, RunWarning, summarize};
use landing_output::{BatchSink, OutputError, WriteResult, write_interim, write_malformed};
use landing_transform::{TransformContext, TransformError, transform};
use landing_validate::{Rule, RuleViolations, ValidateError, ValidationSplit, validate};

/// Stages of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Reading,
    Validating,
    Transforming,
    WritingInterim,
    WritingMalformed,
    Summarizing,
}

impl PipelineStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reading => "read",
            Self::Validating => "validate",
            Self::Transforming => "transform",
            Self::WritingInterim => "write_interim",
            Self::WritingMalformed => "write_malformed",
            Self::Summarizing => "summarize",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal run errors. None of these produce a summary.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read source batch from {location}: {source}")]
    SourceRead {
        location: String,
        #[source]
        source: IngestError,
    },

    #[error("failed to validate batch: {source}")]
    Validation {
        #[source]
        source: ValidateError,
    },

    #[error("failed to transform valid records: {source}")]
    Transform {
        #[source]
        source: TransformError,
    },

    #[error("failed to write interim records to {destination}: {source}")]
    InterimWrite {
        destination: String,
        #[source]
        source: OutputError,
    },
}

impl PipelineError {
    /// Stage the run was in when it failed.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::SourceRead { .. } => PipelineStage::Reading,
            Self::Validation { .. } => PipelineStage::Validating,
            Self::Transform { .. } => PipelineStage::Transforming,
            Self::InterimWrite { .. } => PipelineStage::WritingInterim,
        }
    }
}

/// Per-run identity and processing instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub run_id: String,
    /// Stamped as `processed_timestamp` on every transformed record.
    pub processed_at: DateTime<Utc>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self {
            run_id: new_run_id(),
            processed_at: Utc::now(),
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh identifier for a run; also used in part file names.
pub fn new_run_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: String,
    pub summary: RunSummary,
    pub violations: RuleViolations,
    pub interim: WriteResult,
    /// `None` when there was nothing to quarantine or the write failed.
    pub malformed: Option<WriteResult>,
    pub warnings: Vec<RunWarning>,
}

impl RunReport {
    /// Serializable result handed back to the caller.
    pub fn to_result(&self) -> RunResult {
        RunResult::success(self.summary.clone(), self.warnings.clone())
            .with_interim_output(self.interim.rows_written, self.interim.partitions.clone())
    }
}

/// Outcome of reading and validating a batch without writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckReport {
    pub total_records: usize,
    pub valid_records: usize,
    pub malformed_records: usize,
    pub violations: RuleViolations,
}

/// Run the pipeline with a fresh run id and the current instant.
///
/// # Errors
///
/// Returns the first fatal stage failure.
pub fn run_pipeline(
    config: &PipelineConfig,
    source: &dyn RecordSource,
    interim_sink: &dyn BatchSink,
    malformed_sink: &dyn BatchSink,
) -> Result<RunReport, PipelineError> {
    run_pipeline_with(
        config,
        &RunOptions::new(),
        source,
        interim_sink,
        malformed_sink,
    )
}

/// Run the pipeline with explicit run options.
///
/// # Errors
///
/// Returns the first fatal stage failure.
pub fn run_pipeline_with(
    config: &PipelineConfig,
    options: &RunOptions,
    source: &dyn RecordSource,
    interim_sink: &dyn BatchSink,
    malformed_sink: &dyn BatchSink,
) -> Result<RunReport, PipelineError> {
    let run_span = info_span!("run", run_id = %options.run_id);
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let result = execute(config, options, source, interim_sink, malformed_sink);
    match &result {
        Ok(report) => info!(
            total = report.summary.total_records,
            valid = report.summary.valid_records,
            malformed = report.summary.malformed_records,
            written = report.interim.rows_written,
            warnings = report.warnings.len(),
            duration_ms = run_start.elapsed().as_millis(),
            "run complete"
        ),
        Err(err) => error!(stage = %err.stage(), error = %err, "run failed"),
    }
    result
}

fn execute(
    config: &PipelineConfig,
    options: &RunOptions,
    source: &dyn RecordSource,
    interim_sink: &dyn BatchSink,
    malformed_sink: &dyn BatchSink,
) -> Result<RunReport, PipelineError> {
    let batch = read_stage(config, source)?;
    let split = validate_stage(&batch)?;

    let ctx = TransformContext::new(options.processed_at)
        .with_source_container(config.source_container.as_str());
    let transformed = info_span!("transform").in_scope(|| {
        let start = Instant::now();
        let transformed =
            transform(&split.valid, &ctx).map_err(|source| PipelineError::Transform { source })?;
        info!(
            input_rows = split.valid.height(),
            output_rows = transformed.height(),
            duration_ms = start.elapsed().as_millis(),
            "transform complete"
        );
        Ok::<DataFrame, PipelineError>(transformed)
    })?;

    let interim = info_span!("write_interim").in_scope(|| {
        let start = Instant::now();
        let destination = config.interim_location.as_str();
        let written = write_interim(interim_sink, &transformed, destination).map_err(|source| {
            PipelineError::InterimWrite {
                destination: destination.to_string(),
                source,
            }
        })?;
        info!(
            rows = written.rows_written,
            files = written.files.len(),
            partitions = written.partitions.len(),
            duration_ms = start.elapsed().as_millis(),
            "interim write complete"
        );
        Ok::<WriteResult, PipelineError>(written)
    })?;

    let mut warnings = Vec::new();
    let malformed = if split.invalid.height() == 0 {
        debug!("no malformed records to quarantine");
        None
    } else {
        info_span!("write_malformed").in_scope(|| {
            quarantine(config, &split.invalid, malformed_sink, &mut warnings)
        })
    };

    let summary = summarize(
        split.total(),
        split.valid.height(),
        split.invalid.height(),
        Utc::now(),
    );
    Ok(RunReport {
        run_id: options.run_id.clone(),
        summary,
        violations: split.violations,
        interim,
        malformed,
        warnings,
    })
}

/// Read and validate the source batch without writing anything.
///
/// # Errors
///
/// Returns [`PipelineError::SourceRead`] or [`PipelineError::Validation`].
pub fn check_source(
    config: &PipelineConfig,
    source: &dyn RecordSource,
) -> Result<CheckReport, PipelineError> {
    let batch = read_stage(config, source)?;
    let split = validate_stage(&batch)?;
    Ok(CheckReport {
        total_records: split.total(),
        valid_records: split.valid.height(),
        malformed_records: split.invalid.height(),
        violations: split.violations,
    })
}

fn read_stage(
    config: &PipelineConfig,
    source: &dyn RecordSource,
) -> Result<DataFrame, PipelineError> {
    info_span!("read").in_scope(|| -> Result<DataFrame, PipelineError> {
        let start = Instant::now();
        let location = config.source_location.as_str();
        let batch = source
            .read_batch(location, config.source_format)
            .map_err(|source| PipelineError::SourceRead {
                location: location.to_string(),
                source,
            })?;
        info!(
            location,
            rows = batch.height(),
            columns = batch.width(),
            duration_ms = start.elapsed().as_millis(),
            "source batch read"
        );
        Ok(batch)
    })
}

fn validate_stage(batch: &DataFrame) -> Result<ValidationSplit, PipelineError> {
    info_span!("validate").in_scope(|| -> Result<ValidationSplit, PipelineError> {
        let start = Instant::now();
        let split = validate(batch).map_err(|source| PipelineError::Validation { source })?;
        for rule in Rule::ALL {
            let count = split.violations.count(rule);
            if count > 0 {
                debug!(rule = rule.description(), count, "rule violations");
            }
        }
        info!(
            valid = split.valid.height(),
            malformed = split.invalid.height(),
            duration_ms = start.elapsed().as_millis(),
            "validation complete"
        );
        Ok(split)
    })
}

fn quarantine(
    config: &PipelineConfig,
    invalid: &DataFrame,
    sink: &dyn BatchSink,
    warnings: &mut Vec<RunWarning>,
) -> Option<WriteResult> {
    let start = Instant::now();
    let destination = config.malformed_location.as_str();
    match write_malformed(sink, invalid, destination, Utc::now()) {
        Ok(written) => {
            info!(
                rows = written.rows_written,
                files = written.files.len(),
                duration_ms = start.elapsed().as_millis(),
                "malformed write complete"
            );
            Some(written)
        }
        Err(err) => {
            warn!(
                destination,
                records = invalid.height(),
                error = %err,
                "malformed write failed; continuing"
            );
            warnings.push(RunWarning::MalformedWrite {
                destination: destination.to_string(),
                records: invalid.height(),
                message: err.to_string(),
            });
            None
        }
    }
}
