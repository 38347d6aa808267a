//! File names inside the output directory.

use std::path::{Path, PathBuf};

/// File name of the persisted merged dataset.
pub const MERGED_FILE_NAME: &str = "instacart_clean.csv";

/// File name of the persisted validation report.
pub const REPORT_FILE_NAME: &str = "validation_results.json";

const CLEANED_PREFIX: &str = "cleaned_";

pub fn merged_table_path(dir: &Path) -> PathBuf {
    dir.join(MERGED_FILE_NAME)
}

pub fn validation_report_path(dir: &Path) -> PathBuf {
    dir.join(REPORT_FILE_NAME)
}

/// Output name of a cleaned source file, e.g. `cleaned_orders.csv`.
pub fn cleaned_file_name(source_file: &str) -> String {
    format!("{CLEANED_PREFIX}{source_file}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names() {
        let dir = Path::new("data/clean");
        assert_eq!(merged_table_path(dir), Path::new("data/clean/instacart_clean.csv"));
        assert_eq!(
            validation_report_path(dir),
            Path::new("data/clean/validation_results.json")
        );
        assert_eq!(cleaned_file_name("orders.csv"), "cleaned_orders.csv");
    }
}
