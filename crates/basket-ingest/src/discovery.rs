//! Source file discovery for input directories.

use std::path::{Path, PathBuf};

use basket_model::SourceTable;

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Known source tables found in an input directory.
#[derive(Debug, Default)]
pub struct SourceDiscovery {
    /// Recognized tables with their paths, in [`SourceTable::ALL`] order.
    pub found: Vec<(SourceTable, PathBuf)>,
    /// Known tables with no file in the directory.
    pub missing: Vec<SourceTable>,
    /// CSV files that do not match any known table.
    pub unrecognized: Vec<PathBuf>,
}

impl SourceDiscovery {
    pub fn path_for(&self, table: SourceTable) -> Option<&Path> {
        self.found
            .iter()
            .find(|(found, _)| *found == table)
            .map(|(_, path)| path.as_path())
    }
}

/// Classifies the CSV files of a directory by source table.
pub fn discover_source_files(dir: &Path) -> Result<SourceDiscovery> {
    let files = list_csv_files(dir)?;
    let mut discovery = SourceDiscovery::default();

    let mut recognized: Vec<(SourceTable, PathBuf)> = Vec::new();
    for path in files {
        let table = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(SourceTable::from_file_name);
        match table {
            Some(table) => recognized.push((table, path)),
            None => discovery.unrecognized.push(path),
        }
    }

    for table in SourceTable::ALL {
        match recognized.iter().position(|(found, _)| *found == table) {
            Some(index) => discovery.found.push(recognized.swap_remove(index)),
            None => discovery.missing.push(table),
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        found = discovery.found.len(),
        missing = discovery.missing.len(),
        unrecognized = discovery.unrecognized.len(),
        "discovered source files"
    );

    Ok(discovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "header\ndata").unwrap();
        }
        dir
    }

    #[test]
    fn test_list_csv_files_sorted_and_filtered() {
        let dir = create_test_dir(&["products.csv", "aisles.CSV", "notes.txt"]);
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = list_csv_files(dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("aisles.CSV"));
        assert!(files[1].ends_with("products.csv"));
    }

    #[test]
    fn test_list_csv_files_missing_dir() {
        let result = list_csv_files(Path::new("/nonexistent/raw"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_discover_source_files() {
        let dir = create_test_dir(&["orders.csv", "products.csv", "users.csv"]);

        let discovery = discover_source_files(dir.path()).unwrap();

        assert_eq!(discovery.found.len(), 2);
        assert_eq!(discovery.found[0].0, SourceTable::Orders);
        assert_eq!(discovery.found[1].0, SourceTable::Products);
        assert!(discovery.missing.contains(&SourceTable::Aisles));
        assert!(discovery.missing.contains(&SourceTable::OrderProducts));
        assert_eq!(discovery.unrecognized.len(), 1);
        assert!(discovery.path_for(SourceTable::Orders).is_some());
        assert!(discovery.path_for(SourceTable::Departments).is_none());
    }
}
