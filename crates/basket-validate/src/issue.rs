//! Validation findings.

use std::fmt;

/// A single problem found in a dataset.
///
/// The `Display` text is what ends up in the validation report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    // Presence checks
    /// A required column is absent.
    MissingColumn { column: String },

    // Type checks
    /// An identifier column does not hold a numeric type.
    NonNumeric { column: String, dtype: String },

    // Population checks
    /// A critical column contains nulls.
    NullValues { column: String, null_count: usize },

    // Consistency checks
    /// Product ids that map to more than one distinct name.
    InconsistentProductNames { product_ids: usize },
    /// `order_id` repeats within the table.
    DuplicateOrderIds,

    // Source table rules
    /// Values outside the allowed numeric range.
    OutOfRange {
        column: String,
        count: usize,
        expected: String,
    },
    /// Values outside the allowed set.
    NotInSet {
        column: String,
        count: usize,
        allowed: String,
    },
    /// Empty text.
    EmptyText { column: String, count: usize },
    /// Values that must be unique but repeat.
    NotUnique { column: String, duplicates: usize },
}

impl Issue {
    /// Column the issue refers to, if it is about one column.
    pub fn column(&self) -> Option<&str> {
        match self {
            Issue::MissingColumn { column }
            | Issue::NonNumeric { column, .. }
            | Issue::NullValues { column, .. }
            | Issue::OutOfRange { column, .. }
            | Issue::NotInSet { column, .. }
            | Issue::EmptyText { column, .. }
            | Issue::NotUnique { column, .. } => Some(column),
            Issue::InconsistentProductNames { .. } => Some("product_name"),
            Issue::DuplicateOrderIds => Some("order_id"),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingColumn { column } => write!(f, "Missing required column: {column}"),
            Issue::NonNumeric { column, dtype } => {
                write!(f, "Column {column} must be numeric, found {dtype}")
            }
            Issue::NullValues { column, null_count } => {
                write!(f, "Column {column} has {null_count} null values")
            }
            Issue::InconsistentProductNames { product_ids } => {
                write!(f, "Inconsistent product names for {product_ids} product IDs")
            }
            Issue::DuplicateOrderIds => f.write_str("Duplicate order_id values found"),
            Issue::OutOfRange {
                column,
                count,
                expected,
            } => write!(f, "Column {column} has {count} values outside {expected}"),
            Issue::NotInSet {
                column,
                count,
                allowed,
            } => write!(f, "Column {column} has {count} values not in {{{allowed}}}"),
            Issue::EmptyText { column, count } => {
                write!(f, "Column {column} has {count} empty values")
            }
            Issue::NotUnique { column, duplicates } => {
                write!(f, "Column {column} has {duplicates} duplicate values")
            }
        }
    }
}
