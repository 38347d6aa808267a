//! The load → merge → validate → persist run.
//!
//! # Example
//!
//! ```ignore
//! use basket_core::{EtlPipeline, PipelineContext};
//!
//! let mut pipeline = EtlPipeline::new(PipelineContext::default());
//! let outcome = pipeline.run()?;
//! std::process::exit(if outcome.schema_valid() { 0 } else { 1 });
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use basket_ingest::{SourceTables, load_source_tables};
use basket_model::{CleaningConfig, PipelineState, SourceTable, ValidationReport};
use basket_report::{commit_pair, stage_merged_table, stage_validation_report};
use basket_transform::{CleaningStats, MergeStats, MergedTable, clean, merge};
use basket_validate::{Issue, compute_quality_metrics, validate, validate_source_table};
use tracing::{debug, error, info, info_span, warn};

use crate::context::PipelineContext;
use crate::error::PipelineError;

/// Contract violations found in one raw source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFinding {
    pub table: SourceTable,
    pub issues: Vec<Issue>,
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: ValidationReport,
    pub merged_path: PathBuf,
    pub report_path: PathBuf,
    pub merge_stats: MergeStats,
    /// Advisory findings on the raw tables. Empty when every contract holds.
    pub source_findings: Vec<SourceFinding>,
    /// Per-table cleaning counts, when input cleaning was enabled.
    pub input_cleaning: Vec<(SourceTable, CleaningStats)>,
    pub duration: Duration,
}

impl RunOutcome {
    pub fn schema_valid(&self) -> bool {
        self.report.schema_valid()
    }
}

/// A single-use pipeline run.
#[derive(Debug)]
pub struct EtlPipeline {
    context: PipelineContext,
    state: PipelineState,
}

impl EtlPipeline {
    pub fn new(context: PipelineContext) -> Self {
        Self {
            context,
            state: PipelineState::Init,
        }
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run every stage in order.
    ///
    /// Any load, merge or persist error moves the pipeline to
    /// [`PipelineState::Failed`] and leaves existing outputs untouched.
    pub fn run(&mut self) -> Result<RunOutcome, PipelineError> {
        if self.state != PipelineState::Init {
            return Err(PipelineError::AlreadyFinished { state: self.state });
        }

        let span = info_span!(
            "etl_run",
            input_dir = %self.context.input_dir.display(),
            output_dir = %self.context.output_dir.display(),
        );
        let _guard = span.enter();

        match self.execute() {
            Ok(outcome) => {
                self.advance(PipelineState::Done);
                info!(
                    records = outcome.report.total_records(),
                    schema_valid = outcome.schema_valid(),
                    errors = outcome.report.error_count(),
                    duration_ms = outcome.duration.as_millis(),
                    "pipeline finished"
                );
                Ok(outcome)
            }
            Err(err) => {
                error!(state = %self.state, error = %err, "pipeline failed");
                self.advance(PipelineState::Failed);
                Err(err)
            }
        }
    }

    fn execute(&mut self) -> Result<RunOutcome, PipelineError> {
        let start = Instant::now();

        let mut tables = load_source_tables(&self.context.input_dir, self.context.load_options)?;
        self.advance(PipelineState::Loaded);

        let source_findings = check_sources(&tables);
        let input_cleaning = match &self.context.input_cleaning {
            Some(config) => clean_reference_tables(&mut tables, config)?,
            None => Vec::new(),
        };

        let merged = merge(
            &tables.aisles,
            &tables.departments,
            &tables.products,
            &tables.orders,
        )?;
        self.advance(PipelineState::Merged);

        let errors = validate(merged.data());
        let metrics = compute_quality_metrics(merged.data());
        for message in &errors {
            warn!(%message, "schema validation error");
        }
        self.advance(PipelineState::Validated);

        let (report, merged_path, report_path) =
            persist(&self.context.output_dir, &merged, errors, metrics)?;
        self.advance(PipelineState::Persisted);

        Ok(RunOutcome {
            report,
            merged_path,
            report_path,
            merge_stats: merged.stats(),
            source_findings,
            input_cleaning,
            duration: start.elapsed(),
        })
    }

    fn advance(&mut self, target: PipelineState) {
        debug_assert!(
            self.state.can_transition_to(target),
            "illegal transition {} -> {}",
            self.state,
            target
        );
        debug!(from = %self.state, to = %target, "pipeline state change");
        self.state = target;
    }
}

fn check_sources(tables: &SourceTables) -> Vec<SourceFinding> {
    SourceTable::REQUIRED
        .into_iter()
        .filter_map(|table| {
            let df = tables.get(table)?;
            let issues = validate_source_table(table, df);
            (!issues.is_empty()).then_some(SourceFinding { table, issues })
        })
        .collect()
}

fn clean_reference_tables(
    tables: &mut SourceTables,
    config: &CleaningConfig,
) -> Result<Vec<(SourceTable, CleaningStats)>, PipelineError> {
    let mut stats = Vec::with_capacity(3);
    for (table, df) in [
        (SourceTable::Aisles, &mut tables.aisles),
        (SourceTable::Departments, &mut tables.departments),
        (SourceTable::Products, &mut tables.products),
    ] {
        let cleaned =
            clean(df, config).map_err(|source| PipelineError::Cleaning { table, source })?;
        *df = cleaned.data;
        stats.push((table, cleaned.stats));
    }
    Ok(stats)
}

/// Stage both outputs, then commit them as a pair. A failure while writing or
/// renaming leaves the previous run's files in place.
fn persist(
    dir: &Path,
    merged: &MergedTable,
    errors: Vec<String>,
    metrics: BTreeMap<String, f64>,
) -> Result<(ValidationReport, PathBuf, PathBuf), PipelineError> {
    let staged_table = stage_merged_table(dir, merged)?;
    let report = ValidationReport::new(
        merged.record_count(),
        errors,
        metrics,
        staged_table.size_bytes(),
    );
    let staged_report = stage_validation_report(dir, &report)?;

    let (merged_path, report_path) = commit_pair(staged_table, staged_report)?;
    Ok((report, merged_path, report_path))
}
