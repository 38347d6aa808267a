//! Null checks on critical columns.

use basket_model::columns::CRITICAL;
use polars::prelude::DataFrame;

use crate::issue::Issue;

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let mut issues = Vec::new();
    for name in CRITICAL {
        let Ok(column) = df.column(name) else {
            continue;
        };
        let null_count = column.null_count();
        if null_count > 0 {
            issues.push(Issue::NullValues {
                column: name.to_string(),
                null_count,
            });
        }
    }
    issues
}
