//! Domain model for the grocery catalog ETL.
//!
//! The types here are shared by every stage of the pipeline:
//!
//! - [`SourceTable`]: the known input files and their fixed names
//! - [`columns`]: column names of the source tables and the merged dataset
//! - [`CleaningConfig`]: typed cleaning options (replaces free-form option maps)
//! - [`ValidationReport`]: the persisted outcome of schema validation
//! - [`PipelineState`]: lifecycle of a single pipeline run

pub mod columns;
pub mod error;
pub mod metrics;
pub mod options;
pub mod report;
pub mod state;
pub mod tables;

pub use error::ConfigError;
pub use options::{CleaningConfig, MissingStrategy};
pub use report::ValidationReport;
pub use state::PipelineState;
pub use tables::SourceTable;
