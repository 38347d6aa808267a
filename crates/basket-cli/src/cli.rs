//! CLI argument definitions for the grocery catalog ETL.

use std::path::PathBuf;

use basket_core::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, SAMPLE_INPUT_DIR};
use basket_report::DEFAULT_LIMIT;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "basket",
    version,
    about = "Grocery catalog ETL - merge, validate and query the Instacart product tables",
    long_about = "Merge the Instacart reference tables into one row per product.\n\n\
                  Validates the merged dataset, computes data quality metrics and\n\
                  persists both as instacart_clean.csv and validation_results.json."
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
    /// Load, merge, validate and persist the dataset.
    Run(RunArgs),

    /// Clean every raw source file into cleaned_<file>.csv.
    Clean(CleanArgs),

    /// Show headline numbers of the persisted dataset.
    Summary(OutputArgs),

    /// Filter the persisted dataset.
    Filter(FilterArgs),

    /// Show the last validation report.
    Validation(OutputArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Directory containing the raw CSV files (overrides --sample).
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Use the sample dataset in data/raw_sample.
    #[arg(long = "sample")]
    pub sample: bool,
}

impl InputArgs {
    /// The input directory: explicit path, then sample data, then `data/raw`.
    pub fn resolve(&self) -> PathBuf {
        match &self.input_dir {
            Some(dir) => dir.clone(),
            None if self.sample => PathBuf::from(SAMPLE_INPUT_DIR),
            None => PathBuf::from(DEFAULT_INPUT_DIR),
        }
    }
}

#[derive(Args)]
pub struct OutputArgs {
    /// Directory holding the pipeline outputs.
    #[arg(long = "output-dir", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Maximum number of orders.csv rows to load (default: 100000).
    #[arg(long = "order-row-cap", value_name = "ROWS", conflicts_with = "all_orders")]
    pub order_row_cap: Option<usize>,

    /// Load every row of orders.csv.
    #[arg(long = "all-orders")]
    pub all_orders: bool,

    /// Clean aisles, departments and products before merging.
    ///
    /// Cleaning may drop or rewrite product rows, so it is off by default.
    #[arg(long = "clean-inputs")]
    pub clean_inputs: bool,

    /// TOML cleaning options used with --clean-inputs.
    #[arg(long = "config", value_name = "FILE", requires = "clean_inputs")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// TOML cleaning options applied to every file.
    ///
    /// Without it, orders.csv drops incomplete rows and the other files fill
    /// nulls forward.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Keep products whose department contains this text (case-insensitive).
    #[arg(long = "department", value_name = "TEXT")]
    pub department: Option<String>,

    /// Keep products whose aisle contains this text (case-insensitive).
    #[arg(long = "aisle", value_name = "TEXT")]
    pub aisle: Option<String>,

    /// Minimum product name length.
    #[arg(long = "min-name-length", value_name = "N")]
    pub min_name_length: Option<i64>,

    /// Maximum product name length.
    #[arg(long = "max-name-length", value_name = "N")]
    pub max_name_length: Option<i64>,

    /// Maximum number of records to return (at most 1000).
    #[arg(long = "limit", value_name = "N", default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
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
