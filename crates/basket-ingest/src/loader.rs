//! Loading of the four reference tables for a merge run.

use std::path::Path;
use std::time::Instant;

use basket_model::SourceTable;
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::{IngestError, Result};
use crate::reader::read_csv_table;

/// Rows of `orders.csv` loaded by default.
pub const DEFAULT_ORDER_ROW_CAP: usize = 100_000;

/// Options for [`load_source_tables`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Maximum number of order rows to read. `None` reads the whole file.
    pub order_row_cap: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            order_row_cap: Some(DEFAULT_ORDER_ROW_CAP),
        }
    }
}

impl LoadOptions {
    pub fn with_order_row_cap(mut self, cap: Option<usize>) -> Self {
        self.order_row_cap = cap;
        self
    }
}

/// The raw reference tables of one input directory.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub aisles: DataFrame,
    pub departments: DataFrame,
    pub products: DataFrame,
    pub orders: DataFrame,
}

impl SourceTables {
    pub fn get(&self, table: SourceTable) -> Option<&DataFrame> {
        match table {
            SourceTable::Aisles => Some(&self.aisles),
            SourceTable::Departments => Some(&self.departments),
            SourceTable::Products => Some(&self.products),
            SourceTable::Orders => Some(&self.orders),
            SourceTable::OrderProducts => None,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.aisles.height() + self.departments.height() + self.products.height() + self.orders.height()
    }
}

/// Reads one known table from `dir`, applying `row_cap`.
pub fn load_table(dir: &Path, table: SourceTable, row_cap: Option<usize>) -> Result<DataFrame> {
    let path = dir.join(table.file_name());
    let df = read_csv_table(&path, row_cap)?;
    info!(
        table = %table,
        rows = df.height(),
        columns = df.width(),
        "loaded source table"
    );
    Ok(df)
}

/// Loads aisles, departments, products and orders from `dir`.
///
/// Fails on the first missing or unparsable file.
pub fn load_source_tables(dir: &Path, options: LoadOptions) -> Result<SourceTables> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let start = Instant::now();

    let aisles = load_table(dir, SourceTable::Aisles, None)?;
    let departments = load_table(dir, SourceTable::Departments, None)?;
    let products = load_table(dir, SourceTable::Products, None)?;
    let orders = load_table(dir, SourceTable::Orders, options.order_row_cap)?;

    let tables = SourceTables {
        aisles,
        departments,
        products,
        orders,
    };
    info!(
        dir = %dir.display(),
        total_rows = tables.total_rows(),
        order_row_cap = ?options.order_row_cap,
        duration_ms = start.elapsed().as_millis(),
        "source tables loaded"
    );
    Ok(tables)
}
