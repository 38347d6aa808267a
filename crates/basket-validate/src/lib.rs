//! Validation of the merged grocery dataset.
//!
//! - [`validate`]: schema checks, returned as report-ready messages
//! - [`compute_quality_metrics`]: data quality scores
//! - [`validate_source_table`]: advisory contracts of the raw inputs
//! - [`summarize`] and [`describe`]: descriptive summaries

pub mod checks;
pub mod issue;
pub mod metrics;
pub mod source;
pub mod summary;

pub use checks::{run_all, validate};
pub use issue::Issue;
pub use metrics::compute_quality_metrics;
pub use source::validate_source_table;
pub use summary::{ColumnProfile, DatasetSummary, TableProfile, describe, summarize};
