//! Table cleaning.
//!
//! A cleaning pass applies its steps in a fixed order:
//!
//! 1. duplicate row removal (first occurrence wins)
//! 2. missing value handling per [`MissingStrategy`]
//! 3. whitespace stripping of string columns
//! 4. column name normalization
//!
//! The input frame is never modified.

use std::collections::HashSet;
use std::time::Instant;

use basket_common::{any_to_string, is_numeric_dtype};
use basket_model::{CleaningConfig, MissingStrategy};
use polars::prelude::*;
use tracing::{debug, info};

/// Counts reported by a cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningStats {
    pub input_rows: usize,
    pub output_rows: usize,
    pub duplicates_removed: usize,
    /// Rows removed by [`MissingStrategy::Drop`].
    pub rows_dropped: usize,
    /// Null cells replaced by a fill strategy.
    pub cells_filled: usize,
    pub columns_stripped: usize,
    pub columns_renamed: usize,
}

/// A cleaned copy of a table together with what the pass changed.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub data: DataFrame,
    pub stats: CleaningStats,
}

/// Cleans a copy of `df` according to `config`.
pub fn clean(df: &DataFrame, config: &CleaningConfig) -> PolarsResult<CleanedTable> {
    let start = Instant::now();
    let mut data = df.clone();
    let mut stats = CleaningStats {
        input_rows: df.height(),
        ..CleaningStats::default()
    };

    if config.remove_duplicates {
        stats.duplicates_removed = remove_duplicate_rows(&mut data)?;
    }

    match config.missing_strategy {
        MissingStrategy::Drop => stats.rows_dropped = drop_null_rows(&mut data)?,
        MissingStrategy::FillMean => stats.cells_filled = fill_numeric_means(&mut data)?,
        MissingStrategy::FillForward => stats.cells_filled = fill_forward(&mut data)?,
    }

    if config.strip_whitespace {
        stats.columns_stripped = strip_string_columns(&mut data)?;
    }

    if config.lowercase_columns {
        stats.columns_renamed = normalize_column_names(&mut data)?;
    }

    stats.output_rows = data.height();
    info!(
        input_rows = stats.input_rows,
        output_rows = stats.output_rows,
        duplicates_removed = stats.duplicates_removed,
        rows_dropped = stats.rows_dropped,
        cells_filled = stats.cells_filled,
        missing_strategy = config.missing_strategy.as_str(),
        duration_ms = start.elapsed().as_millis(),
        "cleaning complete"
    );
    Ok(CleanedTable { data, stats })
}

/// Lowercases a column name and replaces spaces with underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn remove_duplicate_rows(df: &mut DataFrame) -> PolarsResult<usize> {
    let height = df.height();
    if height == 0 {
        return Ok(0);
    }
    let mut seen = HashSet::with_capacity(height);
    let mut keep = Vec::with_capacity(height);
    for idx in 0..height {
        // `None` keeps a null distinct from an empty string.
        let mut key: Vec<Option<String>> = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            key.push(match column.get(idx)? {
                AnyValue::Null => None,
                value => Some(any_to_string(value)),
            });
        }
        keep.push(seen.insert(key));
    }
    let removed = keep.iter().filter(|kept| !**kept).count();
    if removed > 0 {
        let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
        *df = df.filter(&mask)?;
    }
    debug!(removed, "removed duplicate rows");
    Ok(removed)
}

fn drop_null_rows(df: &mut DataFrame) -> PolarsResult<usize> {
    let mut keep = vec![true; df.height()];
    for column in df.get_columns() {
        if column.null_count() == 0 {
            continue;
        }
        let nulls = column.as_materialized_series().is_null();
        for (idx, is_null) in nulls.into_iter().enumerate() {
            if is_null.unwrap_or(false) {
                keep[idx] = false;
            }
        }
    }
    let dropped = keep.iter().filter(|kept| !**kept).count();
    if dropped > 0 {
        let mask = BooleanChunked::from_slice("drop_nulls".into(), &keep);
        *df = df.filter(&mask)?;
    }
    debug!(dropped, "dropped rows with missing values");
    Ok(dropped)
}

fn fill_numeric_means(df: &mut DataFrame) -> PolarsResult<usize> {
    let mut replacements = Vec::new();
    let mut filled = 0;
    for column in df.get_columns() {
        let nulls = column.null_count();
        if nulls == 0 || !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let series = column.as_materialized_series().cast(&DataType::Float64)?;
        // An all-null column has no mean and is left as is.
        let Some(mean) = series.mean() else {
            continue;
        };
        let values: Float64Chunked = series
            .f64()?
            .into_iter()
            .map(|value| Some(value.unwrap_or(mean)))
            .collect();
        debug!(column = %column.name(), mean, nulls, "filled nulls with column mean");
        replacements.push(values.with_name(column.name().clone()).into_series());
        filled += nulls;
    }
    for series in replacements {
        df.with_column(series)?;
    }
    Ok(filled)
}

fn fill_forward(df: &mut DataFrame) -> PolarsResult<usize> {
    let mut replacements = Vec::new();
    let mut filled = 0;
    for column in df.get_columns() {
        let before = column.null_count();
        if before == 0 {
            continue;
        }
        let series = column
            .as_materialized_series()
            .fill_null(FillNullStrategy::Forward(None))?;
        filled += before - series.null_count();
        replacements.push(series);
    }
    for series in replacements {
        df.with_column(series)?;
    }
    debug!(filled, "forward filled missing values");
    Ok(filled)
}

fn strip_string_columns(df: &mut DataFrame) -> PolarsResult<usize> {
    let mut replacements = Vec::new();
    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            continue;
        }
        let stripped: StringChunked = column
            .str()?
            .into_iter()
            .map(|value| value.map(str::trim))
            .collect();
        replacements.push(stripped.with_name(column.name().clone()).into_series());
    }
    let count = replacements.len();
    for series in replacements {
        df.with_column(series)?;
    }
    Ok(count)
}

fn normalize_column_names(df: &mut DataFrame) -> PolarsResult<usize> {
    let current = df.get_column_names_str();
    let names: Vec<String> = current.iter().map(|name| normalize_column_name(name)).collect();
    let renamed = current
        .iter()
        .zip(&names)
        .filter(|(old, new)| **old != new.as_str())
        .count();
    if renamed > 0 {
        df.set_column_names(names.as_slice())?;
    }
    Ok(renamed)
}
