//! Shared utilities for the basket crates.

pub mod polars;

pub use self::polars::{
    any_to_f64, any_to_i64, any_to_string, column_i64_values, column_string_values,
    format_numeric, is_numeric_dtype, parse_f64, parse_i64, round_to,
};
