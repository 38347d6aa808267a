//! Persistence of pipeline outputs.
//!
//! The merged dataset is written as `instacart_clean.csv` and its validation
//! report as `validation_results.json`, both inside one output directory.
//! Writes are atomic (temp file + rename) and the pair is committed together.
//! The read side loads both files back and filters the dataset for the query
//! commands.

pub mod error;
pub mod layout;
mod load;
pub mod query;
mod save;

pub use error::{PersistError, Result};
pub use layout::{MERGED_FILE_NAME, REPORT_FILE_NAME, cleaned_file_name};
pub use load::{load_merged_table, load_validation_report};
pub use query::{DEFAULT_LIMIT, FilterQuery, MAX_LIMIT, QueryError, apply_filter};
pub use save::{
    StagedFile, commit_pair, save_cleaned_table, save_merged_table, save_validation_report,
    stage_merged_table, stage_validation_report,
};
