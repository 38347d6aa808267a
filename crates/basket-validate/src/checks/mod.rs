//! Schema checks for the merged dataset.
//!
//! Each module performs one kind of check. All checks run, even when an
//! earlier one already found problems.

mod consistency;
mod datatype;
mod nulls;
mod required;

use polars::prelude::DataFrame;
use tracing::debug;

use crate::issue::Issue;

/// Run every schema check on the merged dataset.
pub fn run_all(df: &DataFrame) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1. Required column presence
    issues.extend(required::check(df));

    // 2. Identifier columns must be numeric
    issues.extend(datatype::check(df));

    // 3. Critical columns must not contain nulls
    issues.extend(nulls::check(df));

    // 4. Cross-row consistency
    issues.extend(consistency::check(df));

    debug!(rows = df.height(), issues = issues.len(), "schema checks complete");
    issues
}

/// Validate the merged dataset, returning report-ready error messages.
///
/// Never fails. An empty list means the schema is valid.
pub fn validate(df: &DataFrame) -> Vec<String> {
    run_all(df).iter().map(ToString::to_string).collect()
}
