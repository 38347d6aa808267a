//! Errors that abort a pipeline run.

use basket_ingest::IngestError;
use basket_model::{PipelineState, SourceTable};
use basket_report::PersistError;
use basket_transform::MergeError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// A fatal pipeline error. Validation findings are never errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    /// Input cleaning of one source table failed.
    #[error("failed to clean {table}")]
    Cleaning {
        table: SourceTable,
        #[source]
        source: PolarsError,
    },

    /// `run` was called on a pipeline that already finished.
    #[error("pipeline already finished in state {state}")]
    AlreadyFinished { state: PipelineState },
}

impl PipelineError {
    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Ingest(IngestError::DirectoryNotFound { .. } | IngestError::MissingFile { .. }) => {
                Some("Check --input-dir. It must contain aisles.csv, departments.csv, products.csv and orders.csv.")
            }
            Self::Persist(err) => err.suggestion(),
            _ => None,
        }
    }
}
