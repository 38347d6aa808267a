//! The denormalized product dataset.

use polars::prelude::DataFrame;

/// Counters collected while merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Rows of the product backbone (and of the merged table).
    pub products: usize,
    /// Products whose `aisle_id` is null or matches no aisle.
    pub unmatched_aisles: usize,
    /// Products whose `department_id` is null or matches no department.
    pub unmatched_departments: usize,
    /// Order rows that went into the per-user aggregation.
    pub orders_considered: usize,
    /// Distinct users seen in the orders table.
    pub users: usize,
}

/// One row per product with aisle and department names joined in and the
/// derived columns appended.
#[derive(Debug, Clone)]
pub struct MergedTable {
    data: DataFrame,
    stats: MergeStats,
}

impl MergedTable {
    pub fn new(data: DataFrame, stats: MergeStats) -> Self {
        Self { data, stats }
    }

    /// Wrap a dataset that was not produced by a merge, such as one read back from disk.
    pub fn from_data(data: DataFrame) -> Self {
        let stats = MergeStats {
            products: data.height(),
            ..MergeStats::default()
        };
        Self { data, stats }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    /// Returns the number of records in the table.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }
}
