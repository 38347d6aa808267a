//! Identifier column data types.

use basket_common::is_numeric_dtype;
use basket_model::columns::NUMERIC_IDS;
use polars::prelude::DataFrame;

use crate::issue::Issue;

/// Check that identifier columns hold a numeric dtype. Absent columns are
/// left to the presence check.
pub fn check(df: &DataFrame) -> Vec<Issue> {
    let mut issues = Vec::new();
    for name in NUMERIC_IDS {
        let Ok(column) = df.column(name) else {
            continue;
        };
        let dtype = column.dtype();
        if is_numeric_dtype(dtype) {
            continue;
        }
        issues.push(Issue::NonNumeric {
            column: name.to_string(),
            dtype: dtype.to_string(),
        });
    }
    issues
}
