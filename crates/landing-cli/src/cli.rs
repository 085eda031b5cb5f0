//! CLI argument definitions for the landing pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use landing_model::DataFormat;

#[derive(Parser)]
#[command(
    name = "landing",
    version,
    about = "Validate, transform and route landing-zone record batches",
    long_about = "Read a batch of raw records from the landing zone, split it into valid and\n\
                  malformed records, enrich and deduplicate the valid ones into date-partitioned\n\
                  interim storage, and quarantine the rest."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline and write interim and malformed output.
    Run(RunArgs),

    /// Read and validate the source batch without writing anything.
    Check(LocationArgs),
}

/// Locations and formats; each flag overrides the config file.
#[derive(Args)]
pub struct LocationArgs {
    /// TOML file with pipeline settings.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Landing zone file or directory.
    #[arg(long = "source", value_name = "PATH")]
    pub source: Option<String>,

    /// Interim zone root.
    #[arg(long = "interim", value_name = "DIR")]
    pub interim: Option<String>,

    /// Malformed (quarantine) zone.
    #[arg(long = "malformed", value_name = "DIR")]
    pub malformed: Option<String>,

    #[arg(long = "source-format", value_enum)]
    pub source_format: Option<FormatArg>,

    /// Encoding for interim and malformed output.
    #[arg(long = "output-format", value_enum)]
    pub output_format: Option<FormatArg>,

    /// Provenance tag stamped on transformed records.
    #[arg(long = "source-container", value_name = "NAME")]
    pub source_container: Option<String>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub locations: LocationArgs,

    /// Print the run result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Parquet,
    Csv,
}

impl From<FormatArg> for DataFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Parquet => Self::Parquet,
            FormatArg::Csv => Self::Csv,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
