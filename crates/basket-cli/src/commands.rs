use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use basket_core::{CleanJob, CleanJobReport, EtlPipeline, PipelineContext, RunOutcome};
use basket_model::{CleaningConfig, ValidationReport};
use basket_report::{FilterQuery, apply_filter, load_merged_table, load_validation_report};
use basket_validate::{DatasetSummary, summarize};

use basket_cli::cli::{CleanArgs, FilterArgs, OutputArgs, RunArgs};

pub fn run_pipeline(args: &RunArgs) -> Result<RunOutcome> {
    let mut context = PipelineContext::new(args.input.resolve(), &args.output.output_dir);
    if args.all_orders {
        context = context.with_order_row_cap(None);
    } else if let Some(cap) = args.order_row_cap {
        context = context.with_order_row_cap(Some(cap));
    }
    if args.clean_inputs {
        let config = load_cleaning_config(args.config.as_deref())?.unwrap_or_default();
        context = context.with_input_cleaning(config);
    }

    let mut pipeline = EtlPipeline::new(context);
    pipeline.run().context("pipeline run failed")
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanJobReport> {
    let input_dir = args.input.resolve();
    let span = info_span!("clean", input_dir = %input_dir.display());
    let _guard = span.enter();

    let mut job = CleanJob::new(&input_dir, &args.output.output_dir);
    if let Some(config) = load_cleaning_config(args.config.as_deref())? {
        info!(missing_strategy = config.missing_strategy.as_str(), "using cleaning config");
        job = job.with_config(config);
    }
    job.run().context("cleaning job failed")
}

pub fn run_summary(args: &OutputArgs) -> Result<DatasetSummary> {
    let df = load_merged_table(&args.output_dir).context("load merged dataset")?;
    Ok(summarize(&df))
}

pub fn run_filter(args: &FilterArgs) -> Result<DataFrame> {
    let df = load_merged_table(&args.output.output_dir).context("load merged dataset")?;
    let query = FilterQuery {
        department: args.department.clone(),
        aisle: args.aisle.clone(),
        min_name_length: args.min_name_length,
        max_name_length: args.max_name_length,
        limit: args.limit,
    };
    apply_filter(&df, &query).context("filter merged dataset")
}

pub fn run_validation(args: &OutputArgs) -> Result<ValidationReport> {
    load_validation_report(&args.output_dir).context("load validation report")
}

fn load_cleaning_config(path: Option<&Path>) -> Result<Option<CleaningConfig>> {
    path.map(|path| {
        CleaningConfig::from_toml_path(path)
            .with_context(|| format!("load cleaning config {}", path.display()))
    })
    .transpose()
}
