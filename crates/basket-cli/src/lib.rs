//! CLI library components for the grocery catalog ETL.

pub mod cli;
pub mod logging;
pub mod records;
