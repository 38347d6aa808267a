//! Orchestration of the grocery catalog ETL.
//!
//! - [`EtlPipeline`]: loads the four reference tables, merges them into one
//!   row per product, validates the result and persists dataset and report
//! - [`CleanJob`]: cleans each raw source file on its own

pub mod clean_job;
pub mod context;
pub mod error;
pub mod pipeline;

pub use clean_job::{CleanJob, CleanJobReport, CleanedFile, FailedFile, run_clean_job};
pub use context::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, PipelineContext, SAMPLE_INPUT_DIR};
pub use error::PipelineError;
pub use pipeline::{EtlPipeline, RunOutcome, SourceFinding};
