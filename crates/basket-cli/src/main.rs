//! Grocery catalog ETL CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use basket_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use basket_cli::logging::{LogConfig, LogFormat, init_logging};
use basket_core::PipelineError;
use basket_report::PersistError;

mod commands;
mod summary;

use crate::commands::{run_clean, run_filter, run_pipeline, run_summary, run_validation};
use crate::summary::{
    print_clean_report, print_dataset_summary, print_filter_result, print_run_summary,
    print_validation_report,
};

/// Exit status of a run whose dataset failed validation.
const EXIT_INVALID: i32 = 1;
/// Exit status of a fatal error.
const EXIT_FATAL: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FATAL);
    }
    let exit_code = match cli.command {
        Command::Run(args) => match run_pipeline(&args) {
            Ok(outcome) => {
                print_run_summary(&outcome);
                if outcome.schema_valid() { 0 } else { EXIT_INVALID }
            }
            Err(error) => report_fatal(&error),
        },
        Command::Clean(args) => match run_clean(&args) {
            Ok(report) => {
                print_clean_report(&report);
                if report.has_failures() { EXIT_INVALID } else { 0 }
            }
            Err(error) => report_fatal(&error),
        },
        Command::Summary(args) => match run_summary(&args) {
            Ok(summary) => {
                print_dataset_summary(&summary);
                0
            }
            Err(error) => report_fatal(&error),
        },
        Command::Filter(args) => match run_filter(&args) {
            Ok(records) => {
                print_filter_result(&records);
                0
            }
            Err(error) => report_fatal(&error),
        },
        Command::Validation(args) => match run_validation(&args) {
            Ok(report) => {
                print_validation_report(&report);
                0
            }
            Err(error) => report_fatal(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_fatal(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    let suggestion = error
        .downcast_ref::<PipelineError>()
        .and_then(PipelineError::suggestion)
        .or_else(|| {
            error
                .downcast_ref::<PersistError>()
                .and_then(PersistError::suggestion)
        });
    if let Some(hint) = suggestion {
        eprintln!("hint: {hint}");
    }
    EXIT_FATAL
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
