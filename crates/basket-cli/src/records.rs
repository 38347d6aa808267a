//! Plain-text rendering of dataset rows.

use basket_common::any_to_string;
use polars::prelude::{AnyValue, DataFrame};

/// Column names and the stringified cells of every row. Nulls render empty.
pub fn frame_rows(df: &DataFrame) -> (Vec<String>, Vec<Vec<String>>) {
    let header = df
        .get_column_names_str()
        .into_iter()
        .map(str::to_string)
        .collect();
    let rows = (0..df.height())
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect()
        })
        .collect();
    (header, rows)
}
