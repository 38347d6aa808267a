//! Read-side filtering of the merged dataset.

use basket_common::{column_i64_values, column_string_values};
use basket_model::columns::{AISLE, DEPARTMENT, PRODUCT_NAME_LENGTH};
use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray, PolarsError};
use thiserror::Error;

/// Rows returned when no limit is given.
pub const DEFAULT_LIMIT: usize = 100;

/// Largest accepted limit.
pub const MAX_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The filter targets a column the dataset does not have.
    #[error("{column} column not available")]
    ColumnUnavailable { column: &'static str },

    #[error("limit {limit} exceeds the maximum of {max}")]
    LimitTooLarge { limit: usize, max: usize },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for QueryError {
    fn from(err: PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Filters over the merged dataset. Unset filters match every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    /// Case-insensitive substring of the department name.
    pub department: Option<String>,
    /// Case-insensitive substring of the aisle name.
    pub aisle: Option<String>,
    /// Inclusive lower bound on `product_name_length`.
    pub min_name_length: Option<i64>,
    /// Inclusive upper bound on `product_name_length`.
    pub max_name_length: Option<i64>,
    pub limit: usize,
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self {
            department: None,
            aisle: None,
            min_name_length: None,
            max_name_length: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_aisle(mut self, aisle: impl Into<String>) -> Self {
        self.aisle = Some(aisle.into());
        self
    }

    pub fn with_name_length_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_name_length = min;
        self.max_name_length = max;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Apply `query` and keep at most `query.limit` of the matching rows, in
/// dataset order.
///
/// Empty text filters are ignored. Rows with a null in a filtered column never
/// match.
pub fn apply_filter(df: &DataFrame, query: &FilterQuery) -> Result<DataFrame, QueryError> {
    if query.limit > MAX_LIMIT {
        return Err(QueryError::LimitTooLarge {
            limit: query.limit,
            max: MAX_LIMIT,
        });
    }

    let mut keep = vec![true; df.height()];
    for (column, needle) in [(DEPARTMENT, &query.department), (AISLE, &query.aisle)] {
        let Some(needle) = needle.as_deref().filter(|text| !text.is_empty()) else {
            continue;
        };
        let values =
            column_string_values(df, column).ok_or(QueryError::ColumnUnavailable { column })?;
        let needle = needle.to_lowercase();
        for (kept, value) in keep.iter_mut().zip(values) {
            *kept &= value.is_some_and(|text| text.to_lowercase().contains(&needle));
        }
    }

    if query.min_name_length.is_some() || query.max_name_length.is_some() {
        let lengths = column_i64_values(df, PRODUCT_NAME_LENGTH).ok_or(
            QueryError::ColumnUnavailable {
                column: PRODUCT_NAME_LENGTH,
            },
        )?;
        for (kept, length) in keep.iter_mut().zip(lengths) {
            *kept &= length.is_some_and(|length| {
                query.min_name_length.is_none_or(|min| length >= min)
                    && query.max_name_length.is_none_or(|max| length <= max)
            });
        }
    }

    let mask = BooleanChunked::from_slice("filter".into(), &keep);
    let filtered = df.filter(&mask)?;
    let result = filtered.head(Some(query.limit));

    tracing::debug!(
        matched = filtered.height(),
        returned = result.height(),
        "applied dataset filter"
    );
    Ok(result)
}
