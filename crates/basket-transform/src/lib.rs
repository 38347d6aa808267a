//! Cleaning and merging of the grocery reference tables.

pub mod clean;
pub mod error;
pub mod frame;
pub mod merge;
pub mod orders;

pub use clean::{CleanedTable, CleaningStats, clean, normalize_column_name};
pub use error::MergeError;
pub use frame::{MergeStats, MergedTable};
pub use merge::{has_special_chars, merge};
pub use orders::{UserOrderStats, aggregate_user_orders};
