use anyhow::{Context, Result};
use tracing::debug;

use landing_cli::pipeline::{CheckReport, RunOptions, RunReport, check_source, run_pipeline_with};
use landing_ingest::LocalSource;
use landing_model::PipelineConfig;
use landing_output::LocalSink;

use crate::cli::{LocationArgs, RunArgs};

pub fn run(args: &RunArgs) -> Result<RunReport> {
    let config = resolve_config(&args.locations)?;
    config
        .validate()
        .context("invalid pipeline configuration")?;
    let options = RunOptions::new();
    let source = LocalSource::new();
    let interim_sink = LocalSink::with_run_id(config.output_format, options.run_id.as_str());
    let malformed_sink = LocalSink::with_run_id(config.output_format, options.run_id.as_str());
    let report = run_pipeline_with(&config, &options, &source, &interim_sink, &malformed_sink)?;
    Ok(report)
}

pub fn check(args: &LocationArgs) -> Result<CheckReport> {
    let config = resolve_config(args)?;
    config
        .validate_source()
        .context("invalid pipeline configuration")?;
    let report = check_source(&config, &LocalSource::new())?;
    Ok(report)
}

/// Config file first, then flag overrides.
fn resolve_config(args: &LocationArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_toml_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(source) = &args.source {
        config.source_location.clone_from(source);
    }
    if let Some(interim) = &args.interim {
        config.interim_location.clone_from(interim);
    }
    if let Some(malformed) = &args.malformed {
        config.malformed_location.clone_from(malformed);
    }
    if let Some(format) = args.source_format {
        config.source_format = format.into();
    }
    if let Some(format) = args.output_format {
        config.output_format = format.into();
    }
    if let Some(container) = &args.source_container {
        config.source_container.clone_from(container);
    }
    debug!(?config, "configuration resolved");
    Ok(config)
}
