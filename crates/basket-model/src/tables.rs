//! Known source tables of the grocery dataset.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A source table that the loader knows how to find by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    Aisles,
    Departments,
    Products,
    Orders,
    /// Order line items. Only processed by the per-file cleaning job.
    OrderProducts,
}

impl SourceTable {
    /// Tables the merge run cannot proceed without.
    pub const REQUIRED: [SourceTable; 4] = [
        SourceTable::Aisles,
        SourceTable::Departments,
        SourceTable::Products,
        SourceTable::Orders,
    ];

    /// Every table the cleaning job looks for, in processing order.
    pub const ALL: [SourceTable; 5] = [
        SourceTable::Orders,
        SourceTable::OrderProducts,
        SourceTable::Products,
        SourceTable::Aisles,
        SourceTable::Departments,
    ];

    /// File name of the table inside the input directory.
    pub fn file_name(self) -> &'static str {
        match self {
            SourceTable::Aisles => "aisles.csv",
            SourceTable::Departments => "departments.csv",
            SourceTable::Products => "products.csv",
            SourceTable::Orders => "orders.csv",
            SourceTable::OrderProducts => "order_products__prior.csv",
        }
    }

    /// Short name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            SourceTable::Aisles => "aisles",
            SourceTable::Departments => "departments",
            SourceTable::Products => "products",
            SourceTable::Orders => "orders",
            SourceTable::OrderProducts => "order_products",
        }
    }

    /// Resolve a table from its file name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|table| table.file_name().eq_ignore_ascii_case(file_name))
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_fixed() {
        assert_eq!(SourceTable::Aisles.file_name(), "aisles.csv");
        assert_eq!(
            SourceTable::OrderProducts.file_name(),
            "order_products__prior.csv"
        );
    }

    #[test]
    fn resolves_from_file_name() {
        assert_eq!(
            SourceTable::from_file_name("PRODUCTS.csv"),
            Some(SourceTable::Products)
        );
        assert_eq!(SourceTable::from_file_name("users.csv"), None);
    }

    #[test]
    fn required_tables_exclude_order_products() {
        assert!(!SourceTable::REQUIRED.contains(&SourceTable::OrderProducts));
    }
}
