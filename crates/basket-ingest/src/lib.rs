//! Source data ingestion for the grocery catalog ETL.
//!
//! This crate discovers the known source files in an input directory and
//! loads them into Polars DataFrames.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use basket_ingest::{LoadOptions, load_source_tables};
//!
//! let tables = load_source_tables(Path::new("data/raw"), LoadOptions::default())?;
//! println!("{} products", tables.products.height());
//! ```

mod discovery;
mod error;
mod loader;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::read_csv_table;

// === File Discovery ===
pub use discovery::{SourceDiscovery, discover_source_files, list_csv_files};

// === Table Loading ===
pub use loader::{DEFAULT_ORDER_ROW_CAP, LoadOptions, SourceTables, load_source_tables, load_table};
