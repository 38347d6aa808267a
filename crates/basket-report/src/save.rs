//! Dataset and report saving operations.
//!
//! Every write goes to a hidden temp file next to its target and is renamed
//! into place, so a reader never sees a partially written file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use basket_model::ValidationReport;
use basket_transform::MergedTable;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use crate::error::{PersistError, Result};
use crate::layout::{cleaned_file_name, merged_table_path, validation_report_path};

/// A fully written temp file waiting to replace its target.
///
/// Dropping a staged file without committing it removes the temp file.
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    target_path: PathBuf,
    size_bytes: u64,
    committed: bool,
}

impl StagedFile {
    fn write<F>(target_path: &Path, write: F) -> Result<Self>
    where
        F: FnOnce(&mut File, &Path) -> Result<()>,
    {
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).map_err(|e| PersistError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut staged = Self {
            temp_path: hidden_sibling(target_path, "tmp"),
            target_path: target_path.to_path_buf(),
            size_bytes: 0,
            committed: false,
        };

        let mut file = File::create(&staged.temp_path).map_err(|e| PersistError::Io {
            operation: "create",
            path: staged.temp_path.clone(),
            source: e,
        })?;
        write(&mut file, &staged.temp_path)?;
        file.sync_all().map_err(|e| PersistError::Io {
            operation: "sync",
            path: staged.temp_path.clone(),
            source: e,
        })?;
        staged.size_bytes = file
            .metadata()
            .map_err(|e| PersistError::Io {
                operation: "inspect",
                path: staged.temp_path.clone(),
                source: e,
            })?
            .len();

        Ok(staged)
    }

    /// Where the file lands on commit.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Size of the written payload in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Rename the temp file over the target, replacing any previous content.
    pub fn commit(mut self) -> Result<PathBuf> {
        fs::rename(&self.temp_path, &self.target_path).map_err(|e| {
            PersistError::AtomicWriteFailed {
                temp_path: self.temp_path.clone(),
                target_path: self.target_path.clone(),
                source: e,
            }
        })?;
        self.committed = true;
        tracing::info!(
            path = %self.target_path.display(),
            bytes = self.size_bytes,
            "saved output file"
        );
        Ok(self.target_path.clone())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed
            && self.temp_path.exists()
            && let Err(error) = fs::remove_file(&self.temp_path)
        {
            tracing::warn!(
                path = %self.temp_path.display(),
                %error,
                "failed to remove staged temp file"
            );
        }
    }
}

/// `dir/name` becomes `dir/.name.<suffix>`.
fn hidden_sibling(target: &Path, suffix: &str) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{file_name}.{suffix}"))
}

/// Commit two staged files so that either both land or neither does.
///
/// The previous content of `first`'s target is moved to a `.bak` sibling
/// until `second` has been renamed into place. If either rename fails the
/// backup is put back and the error is returned.
pub fn commit_pair(first: StagedFile, second: StagedFile) -> Result<(PathBuf, PathBuf)> {
    let first_target = first.target_path().to_path_buf();
    let backup = hidden_sibling(&first_target, "bak");
    let had_previous = first_target.is_file();
    if had_previous {
        fs::rename(&first_target, &backup).map_err(|e| PersistError::Io {
            operation: "back up",
            path: first_target.clone(),
            source: e,
        })?;
    }

    match first
        .commit()
        .and_then(|first_path| second.commit().map(|second_path| (first_path, second_path)))
    {
        Ok(paths) => {
            if had_previous && let Err(error) = fs::remove_file(&backup) {
                tracing::warn!(path = %backup.display(), %error, "failed to remove backup");
            }
            Ok(paths)
        }
        Err(error) => {
            restore_previous(&first_target, &backup, had_previous);
            Err(error)
        }
    }
}

fn restore_previous(target: &Path, backup: &Path, had_previous: bool) {
    let restored = if had_previous {
        fs::rename(backup, target)
    } else if target.exists() {
        fs::remove_file(target)
    } else {
        Ok(())
    };
    match restored {
        Ok(()) => tracing::warn!(path = %target.display(), "restored previous output"),
        Err(error) => {
            tracing::error!(path = %target.display(), %error, "failed to restore previous output");
        }
    }
}

fn write_csv(file: &mut File, path: &Path, df: &DataFrame) -> Result<()> {
    // The writer needs a mutable frame; columns are shared, not copied.
    let mut df = df.clone();
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| PersistError::Csv {
            operation: "write",
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Write the merged dataset to a temp file beside `instacart_clean.csv`.
pub fn stage_merged_table(dir: &Path, table: &MergedTable) -> Result<StagedFile> {
    StagedFile::write(&merged_table_path(dir), |file, path| {
        write_csv(file, path, table.data())
    })
}

/// Write the report as pretty JSON to a temp file beside `validation_results.json`.
pub fn stage_validation_report(dir: &Path, report: &ValidationReport) -> Result<StagedFile> {
    let target = validation_report_path(dir);
    let json = serde_json::to_string_pretty(report).map_err(|e| PersistError::Serialization {
        operation: "encode",
        path: target.clone(),
        source: e,
    })?;
    StagedFile::write(&target, |file, path| {
        file.write_all(json.as_bytes())
            .map_err(|e| PersistError::Io {
                operation: "write",
                path: path.to_path_buf(),
                source: e,
            })
    })
}

/// Save the merged dataset as `instacart_clean.csv`, replacing any previous file.
pub fn save_merged_table(dir: &Path, table: &MergedTable) -> Result<PathBuf> {
    stage_merged_table(dir, table)?.commit()
}

/// Save the report as `validation_results.json`, replacing any previous file.
pub fn save_validation_report(dir: &Path, report: &ValidationReport) -> Result<PathBuf> {
    stage_validation_report(dir, report)?.commit()
}

/// Save one cleaned source table as `cleaned_<file_name>`.
pub fn save_cleaned_table(dir: &Path, file_name: &str, df: &DataFrame) -> Result<PathBuf> {
    let target = dir.join(cleaned_file_name(file_name));
    StagedFile::write(&target, |file, path| write_csv(file, path, df))?.commit()
}
