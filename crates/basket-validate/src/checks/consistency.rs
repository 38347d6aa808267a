//! Cross-row consistency checks.

use std::collections::{HashMap, HashSet};

use basket_common::column_string_values;
use basket_model::columns::{ORDER_ID, PRODUCT_ID, PRODUCT_NAME};
use polars::prelude::DataFrame;

use crate::issue::Issue;

pub fn check(df: &DataFrame) -> Vec<Issue> {
    let mut issues = Vec::new();
    if let Some(issue) = inconsistent_product_names(df) {
        issues.push(issue);
    }
    if has_duplicate_order_ids(df) {
        issues.push(Issue::DuplicateOrderIds);
    }
    issues
}

/// Product ids with more than one distinct non-null name.
fn inconsistent_product_names(df: &DataFrame) -> Option<Issue> {
    let ids = column_string_values(df, PRODUCT_ID)?;
    let names = column_string_values(df, PRODUCT_NAME)?;

    let mut names_by_id: HashMap<String, HashSet<String>> = HashMap::new();
    for (id, name) in ids.into_iter().zip(names) {
        let (Some(id), Some(name)) = (id, name) else {
            continue;
        };
        names_by_id.entry(id).or_default().insert(name);
    }
    let product_ids = names_by_id.values().filter(|names| names.len() > 1).count();
    (product_ids > 0).then_some(Issue::InconsistentProductNames { product_ids })
}

fn has_duplicate_order_ids(df: &DataFrame) -> bool {
    let Some(order_ids) = column_string_values(df, ORDER_ID) else {
        return false;
    };
    let mut seen = HashSet::with_capacity(order_ids.len());
    order_ids
        .into_iter()
        .flatten()
        .any(|order_id| !seen.insert(order_id))
}
