//! Required column presence.

use basket_model::columns::REQUIRED;
use polars::prelude::DataFrame;

use crate::issue::Issue;

/// One issue per required column absent from the dataset.
pub fn check(df: &DataFrame) -> Vec<Issue> {
    REQUIRED
        .iter()
        .filter(|column| df.column(column).is_err())
        .map(|column| Issue::MissingColumn {
            column: (*column).to_string(),
        })
        .collect()
}
