//! CLI argument definitions for the `wellink` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use wellink_model::StrategyKind;

use wellink_cli::sink::DEFAULT_TABLE;

#[derive(Parser)]
#[command(
    name = "wellink",
    version,
    about = "Link drilling-permit wells to tax-reporting production units",
    long_about = "Link drilling-permit wells to tax-reporting production units.\n\n\
                  Runs merge-allocation propagation, name, operator+TRS and weighted\n\
                  matching over registry snapshots and writes proposed links in batches."
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

    /// Log output format (pretty for human, json for machine parsing).
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
    /// Link wells to production units and write the proposed links.
    Run(RunArgs),

    /// List the matching strategies and the method tags they emit.
    Strategies,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Wells CSV (permit_number, well_name, operator_id, well_type, county, section, township, range).
    #[arg(long = "wells", value_name = "CSV")]
    pub wells: PathBuf,

    /// Production units CSV (unit_number, base_key, lease_name, operator_id, classification, ...).
    #[arg(long = "units", value_name = "CSV")]
    pub units: PathBuf,

    /// Existing links CSV (permit_number, unit_number).
    #[arg(long = "links", value_name = "CSV")]
    pub links: Option<PathBuf>,

    /// Permit list restricting the weighted strategy.
    #[arg(long = "targets", value_name = "FILE")]
    pub targets: Option<PathBuf>,

    /// Strategy to run; repeat to run several in the given order (default: all).
    #[arg(long = "strategy", value_enum, value_name = "STRATEGY")]
    pub strategies: Vec<StrategyArg>,

    /// Output directory for batch files (default: <WELLS_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Batch file format.
    #[arg(long = "format", value_enum, default_value = "jsonl")]
    pub format: OutputFormatArg,

    /// Table named in SQL batches.
    #[arg(long = "table", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Run and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// TOML configuration file (default: $WELLINK_CONFIG).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Links per batch, clamped to 1..=500.
    #[arg(long = "batch-size", value_name = "N")]
    pub batch_size: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Merge,
    Name,
    Operator,
    Weighted,
}

impl From<StrategyArg> for StrategyKind {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Merge => StrategyKind::MergeAllocation,
            StrategyArg::Name => StrategyKind::Name,
            StrategyArg::Operator => StrategyKind::OperatorTrs,
            StrategyArg::Weighted => StrategyKind::Weighted,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Jsonl,
    Sql,
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
