//! Data quality metrics of the merged dataset.
//!
//! Metrics never fail. On an empty table, or when the column a metric reads is
//! absent, the metric is 0.

use std::collections::{BTreeMap, HashSet};

use basket_common::{any_to_f64, column_string_values};
use basket_model::columns::{PRODUCT_ID, PRODUCT_NAME, PRODUCT_NAME_LENGTH};
use basket_model::metrics::{
    AVG_PRODUCT_NAME_LENGTH, COMPLETENESS_RATIO, MAX_PRODUCT_NAME_LENGTH, PRODUCT_ID_UNIQUENESS,
    VALID_PRODUCT_NAMES_RATIO,
};
use polars::prelude::{AnyValue, DataFrame};

/// Compute every quality metric, keyed by metric name.
pub fn compute_quality_metrics(df: &DataFrame) -> BTreeMap<String, f64> {
    let (avg_length, max_length) = name_length_stats(df);
    BTreeMap::from([
        (COMPLETENESS_RATIO.to_string(), completeness_ratio(df)),
        (PRODUCT_ID_UNIQUENESS.to_string(), product_id_uniqueness(df)),
        (
            VALID_PRODUCT_NAMES_RATIO.to_string(),
            valid_product_names_ratio(df),
        ),
        (AVG_PRODUCT_NAME_LENGTH.to_string(), avg_length),
        (MAX_PRODUCT_NAME_LENGTH.to_string(), max_length),
    ])
}

/// Share of non-null cells over all cells.
pub fn completeness_ratio(df: &DataFrame) -> f64 {
    let cells = df.height() * df.width();
    if cells == 0 {
        return 0.0;
    }
    let nulls: usize = df.get_columns().iter().map(|column| column.null_count()).sum();
    (cells - nulls) as f64 / cells as f64
}

/// Distinct non-null product ids over row count.
pub fn product_id_uniqueness(df: &DataFrame) -> f64 {
    let rows = df.height();
    let Some(ids) = column_string_values(df, PRODUCT_ID).filter(|_| rows > 0) else {
        return 0.0;
    };
    let distinct: HashSet<String> = ids.into_iter().flatten().collect();
    distinct.len() as f64 / rows as f64
}

/// Rows whose product name has at least one character, over row count.
pub fn valid_product_names_ratio(df: &DataFrame) -> f64 {
    let rows = df.height();
    let Some(names) = column_string_values(df, PRODUCT_NAME).filter(|_| rows > 0) else {
        return 0.0;
    };
    let valid = names
        .iter()
        .filter(|name| name.as_deref().is_some_and(|text| !text.is_empty()))
        .count();
    valid as f64 / rows as f64
}

/// Mean and maximum of the non-null `product_name_length` values.
pub fn name_length_stats(df: &DataFrame) -> (f64, f64) {
    let Ok(column) = df.column(PRODUCT_NAME_LENGTH) else {
        return (0.0, 0.0);
    };
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut max = 0.0f64;
    for idx in 0..df.height() {
        if let Some(length) = any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)) {
            sum += length;
            count += 1;
            max = max.max(length);
        }
    }
    if count == 0 {
        return (0.0, 0.0);
    }
    (sum / count as f64, max)
}
