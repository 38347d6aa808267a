//! Descriptive summaries of datasets.

use std::collections::HashSet;

use basket_common::{column_string_values, round_to};
use basket_model::columns::{AISLE, DEPARTMENT, PRODUCT_ID};
use polars::prelude::DataFrame;
use serde::Serialize;

use crate::metrics::{completeness_ratio, name_length_stats};

/// Headline numbers of the merged dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub total_products: usize,
    pub total_aisles: usize,
    pub total_departments: usize,
    /// Rounded to 2 decimals.
    pub avg_product_name_length: f64,
    /// Completeness ratio rounded to 3 decimals.
    pub data_quality_score: f64,
}

/// Summarize the merged dataset. Absent columns count as zero distinct values.
pub fn summarize(df: &DataFrame) -> DatasetSummary {
    let (avg_length, _) = name_length_stats(df);
    DatasetSummary {
        total_records: df.height(),
        total_products: distinct_non_null(df, PRODUCT_ID),
        total_aisles: distinct_non_null(df, AISLE),
        total_departments: distinct_non_null(df, DEPARTMENT),
        avg_product_name_length: round_to(avg_length, 2),
        data_quality_score: round_to(completeness_ratio(df), 3),
    }
}

fn distinct_non_null(df: &DataFrame, column: &str) -> usize {
    column_string_values(df, column)
        .map(|values| values.into_iter().flatten().collect::<HashSet<_>>().len())
        .unwrap_or(0)
}

/// Shape and per-column null counts of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableProfile {
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
}

impl TableProfile {
    pub fn total_nulls(&self) -> usize {
        self.columns.iter().map(|column| column.null_count).sum()
    }
}

/// Describe a table's shape, dtypes and missing values.
pub fn describe(df: &DataFrame) -> TableProfile {
    TableProfile {
        rows: df.height(),
        columns: df
            .get_columns()
            .iter()
            .map(|column| ColumnProfile {
                name: column.name().to_string(),
                dtype: column.dtype().to_string(),
                null_count: column.null_count(),
            })
            .collect(),
    }
}
