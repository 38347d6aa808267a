//! Merge error types.

use basket_model::SourceTable;
use thiserror::Error;

/// Errors that abort a merge.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A column needed to join or aggregate is absent from its table.
    #[error("{table} table is missing join key column '{column}'")]
    MissingJoinKey {
        table: SourceTable,
        column: &'static str,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for MergeError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}
