//! Argument parsing and row rendering.

use std::path::PathBuf;

use basket_cli::cli::{Cli, Command};
use basket_cli::records::frame_rows;
use clap::Parser;
use polars::prelude::{DataFrame, NamedFrom, Series};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("basket").chain(args.iter().copied())).unwrap()
}

#[test]
fn run_defaults_to_raw_and_clean_directories() {
    let Command::Run(args) = parse(&["run"]).command else {
        panic!("expected run");
    };

    assert_eq!(args.input.resolve(), PathBuf::from("data/raw"));
    assert_eq!(args.output.output_dir, PathBuf::from("data/clean"));
    assert_eq!(args.order_row_cap, None);
    assert!(!args.clean_inputs);
}

#[test]
fn sample_flag_selects_sample_directory() {
    let Command::Run(args) = parse(&["run", "--sample"]).command else {
        panic!("expected run");
    };

    assert_eq!(args.input.resolve(), PathBuf::from("data/raw_sample"));
}

#[test]
fn explicit_input_dir_wins_over_sample() {
    let Command::Clean(args) = parse(&["clean", "--sample", "--input-dir", "/tmp/in"]).command
    else {
        panic!("expected clean");
    };

    assert_eq!(args.input.resolve(), PathBuf::from("/tmp/in"));
}

#[test]
fn row_cap_conflicts_with_all_orders() {
    let result = Cli::try_parse_from(["basket", "run", "--order-row-cap", "10", "--all-orders"]);

    assert!(result.is_err());
}

#[test]
fn config_requires_clean_inputs_on_run() {
    let result = Cli::try_parse_from(["basket", "run", "--config", "clean.toml"]);

    assert!(result.is_err());
}

#[test]
fn filter_limit_defaults_to_one_hundred() {
    let Command::Filter(args) =
        parse(&["filter", "--department", "frozen", "--min-name-length", "5"]).command
    else {
        panic!("expected filter");
    };

    assert_eq!(args.limit, 100);
    assert_eq!(args.department.as_deref(), Some("frozen"));
    assert_eq!(args.min_name_length, Some(5));
    assert_eq!(args.max_name_length, None);
}

#[test]
fn global_flags_follow_the_subcommand() {
    let cli = parse(&["validation", "--log-format", "json", "--log-file", "etl.log"]);

    assert!(matches!(cli.command, Command::Validation(_)));
    assert_eq!(cli.log_file, Some(PathBuf::from("etl.log")));
}

#[test]
fn filtered_rows_render_as_text() {
    let df = DataFrame::new(vec![
        Series::new("product_id".into(), vec![1i64, 2]).into(),
        Series::new("product_name".into(), vec!["Bread", "Ice Cream"]).into(),
        Series::new("aisle".into(), vec![Some("bakery"), None]).into(),
        Series::new("has_special_chars".into(), vec![false, false]).into(),
    ])
    .unwrap();

    let (header, rows) = frame_rows(&df);

    insta::assert_debug_snapshot!((header, rows), @r#"
    (
        [
            "product_id",
            "product_name",
            "aisle",
            "has_special_chars",
        ],
        [
            [
                "1",
                "Bread",
                "bakery",
                "false",
            ],
            [
                "2",
                "Ice Cream",
                "",
                "false",
            ],
        ],
    )
    "#);
}
