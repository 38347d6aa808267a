//! Per-file cleaning of every known source table.
//!
//! Each file present in the input directory is cleaned on its own and written
//! as `cleaned_<file>`. One bad file never stops the others.

use std::path::{Path, PathBuf};
use std::time::Instant;

use basket_ingest::{discover_source_files, read_csv_table};
use basket_model::{CleaningConfig, MissingStrategy, SourceTable};
use basket_report::save_cleaned_table;
use basket_transform::{CleaningStats, clean};
use basket_validate::{TableProfile, describe};
use tracing::{debug, error, info, info_span, warn};

use crate::error::PipelineError;

/// One file the job cleaned and wrote.
#[derive(Debug, Clone)]
pub struct CleanedFile {
    pub table: SourceTable,
    pub output_path: PathBuf,
    pub before: TableProfile,
    pub after: TableProfile,
    pub stats: CleaningStats,
}

/// One file the job could not process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub table: SourceTable,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct CleanJobReport {
    pub processed: Vec<CleanedFile>,
    /// Known tables with no file in the input directory.
    pub skipped: Vec<SourceTable>,
    pub failed: Vec<FailedFile>,
}

impl CleanJobReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// The cleaning job over one input directory.
#[derive(Debug, Clone)]
pub struct CleanJob {
    input_dir: PathBuf,
    output_dir: PathBuf,
    config: Option<CleaningConfig>,
}

impl CleanJob {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            config: None,
        }
    }

    /// Use `config` for every file instead of the per-table defaults.
    pub fn with_config(mut self, config: CleaningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Cleaning options applied to `table`.
    ///
    /// Without an explicit config, orders drop incomplete rows and every
    /// other table fills forward.
    pub fn config_for(&self, table: SourceTable) -> CleaningConfig {
        if let Some(config) = &self.config {
            return config.clone();
        }
        let strategy = match table {
            SourceTable::Orders => MissingStrategy::Drop,
            _ => MissingStrategy::FillForward,
        };
        CleaningConfig::default().with_missing_strategy(strategy)
    }

    pub fn run(&self) -> Result<CleanJobReport, PipelineError> {
        let span = info_span!("clean_job", input_dir = %self.input_dir.display());
        let _guard = span.enter();
        let start = Instant::now();

        let discovery = discover_source_files(&self.input_dir)?;
        for path in &discovery.unrecognized {
            debug!(path = %path.display(), "ignoring unrecognized csv file");
        }

        let mut report = CleanJobReport::default();
        for table in SourceTable::ALL {
            let Some(path) = discovery.path_for(table) else {
                warn!(
                    file = table.file_name(),
                    dir = %self.input_dir.display(),
                    "source file not found, skipping"
                );
                report.skipped.push(table);
                continue;
            };
            match self.clean_file(table, path) {
                Ok(cleaned) => report.processed.push(cleaned),
                Err(message) => {
                    error!(file = table.file_name(), %message, "failed to clean file");
                    report.failed.push(FailedFile { table, message });
                }
            }
        }

        info!(
            processed = report.processed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            duration_ms = start.elapsed().as_millis(),
            "cleaning job complete"
        );
        Ok(report)
    }

    fn clean_file(&self, table: SourceTable, path: &Path) -> Result<CleanedFile, String> {
        let df = read_csv_table(path, None).map_err(|e| e.to_string())?;
        let before = describe(&df);
        info!(
            table = %table,
            rows = before.rows,
            columns = before.columns.len(),
            missing_values = before.total_nulls(),
            "before cleaning"
        );

        let config = self.config_for(table);
        let cleaned = clean(&df, &config).map_err(|e| e.to_string())?;
        let after = describe(&cleaned.data);
        info!(
            table = %table,
            rows = after.rows,
            columns = after.columns.len(),
            missing_values = after.total_nulls(),
            "after cleaning"
        );

        let output_path = save_cleaned_table(&self.output_dir, table.file_name(), &cleaned.data)
            .map_err(|e| e.to_string())?;
        Ok(CleanedFile {
            table,
            output_path,
            before,
            after,
            stats: cleaned.stats,
        })
    }
}

/// Clean every known source file of `input_dir` into `output_dir` with the
/// per-table defaults.
pub fn run_clean_job(input_dir: &Path, output_dir: &Path) -> Result<CleanJobReport, PipelineError> {
    CleanJob::new(input_dir, output_dir).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_drop_and_others_fill_forward() {
        let job = CleanJob::new("in", "out");

        assert_eq!(
            job.config_for(SourceTable::Orders).missing_strategy,
            MissingStrategy::Drop
        );
        for table in [SourceTable::Aisles, SourceTable::OrderProducts] {
            assert_eq!(
                job.config_for(table).missing_strategy,
                MissingStrategy::FillForward
            );
        }
    }

    #[test]
    fn explicit_config_applies_to_every_table() {
        let config = CleaningConfig::default().with_missing_strategy(MissingStrategy::FillMean);
        let job = CleanJob::new("in", "out").with_config(config.clone());

        assert_eq!(job.config_for(SourceTable::Orders), config);
        assert_eq!(job.config_for(SourceTable::Products), config);
    }
}
