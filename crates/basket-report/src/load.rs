//! Readers for the persisted outputs.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use basket_model::ValidationReport;
use basket_model::columns::{
    AISLE, DEPARTMENT, ESTIMATED_POPULARITY, HAS_SPECIAL_CHARS, PRODUCT_NAME_LENGTH,
    SAMPLE_USER_ORDERS,
};
use polars::prelude::{
    CsvReadOptions, DataFrame, DataType, PolarsResult, Schema, SchemaRef, SerReader,
};

use crate::error::{PersistError, Result};
use crate::layout::{merged_table_path, validation_report_path};

/// Types of the merger's derived columns. Text inference reads an all-null
/// column as `str`, so these are pinned on load.
fn derived_column_types() -> [(&'static str, DataType); 6] {
    [
        (AISLE, DataType::String),
        (DEPARTMENT, DataType::String),
        (PRODUCT_NAME_LENGTH, DataType::Int64),
        (HAS_SPECIAL_CHARS, DataType::Boolean),
        (SAMPLE_USER_ORDERS, DataType::Int64),
        (ESTIMATED_POPULARITY, DataType::Int64),
    ]
}

fn read_csv(
    path: &Path,
    n_rows: Option<usize>,
    overwrite: Option<SchemaRef>,
) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_n_rows(n_rows)
        .with_schema_overwrite(overwrite)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

/// Load `instacart_clean.csv` from the output directory.
///
/// Derived columns present in the header keep their saved types; the
/// product columns are inferred from the text.
pub fn load_merged_table(dir: &Path) -> Result<DataFrame> {
    let path = merged_table_path(dir);
    if !path.is_file() {
        return Err(PersistError::Io {
            operation: "read",
            path,
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }

    let to_csv_error = |e: polars::prelude::PolarsError| PersistError::Csv {
        operation: "read",
        path: path.clone(),
        message: e.to_string(),
    };
    let header = read_csv(&path, Some(0), None).map_err(to_csv_error)?;
    let mut pinned = Schema::with_capacity(header.width());
    for (name, dtype) in derived_column_types() {
        if header.column(name).is_ok() {
            pinned.with_column(name.into(), dtype);
        }
    }
    let overwrite = (!pinned.is_empty()).then(|| Arc::new(pinned));
    let df = read_csv(&path, None, overwrite).map_err(to_csv_error)?;

    tracing::debug!(path = %path.display(), rows = df.height(), "loaded merged table");
    Ok(df)
}

/// Load `validation_results.json` from the output directory.
pub fn load_validation_report(dir: &Path) -> Result<ValidationReport> {
    let path = validation_report_path(dir);
    let text = fs::read_to_string(&path).map_err(|e| PersistError::Io {
        operation: "read",
        path: path.clone(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| PersistError::Serialization {
        operation: "decode",
        path,
        source: e,
    })
}
