//! Cleaning options.
//!
//! [`CleaningConfig`] is deserializable with every field defaulted, so a
//! config file only needs to name the options it changes:
//!
//! ```toml
//! missing_strategy = "fill_forward"
//! lowercase_columns = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the cleaner treats missing (null) cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStrategy {
    /// Remove every row that has a null in any column.
    #[default]
    Drop,
    /// Replace nulls in numeric columns with the column mean.
    FillMean,
    /// Replace each null with the nearest preceding non-null value.
    FillForward,
}

impl MissingStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            MissingStrategy::Drop => "drop",
            MissingStrategy::FillMean => "fill_mean",
            MissingStrategy::FillForward => "fill_forward",
        }
    }
}

/// Options controlling a cleaning pass over one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Drop exact duplicate rows, keeping the first occurrence.
    pub remove_duplicates: bool,
    /// Null handling.
    pub missing_strategy: MissingStrategy,
    /// Trim leading and trailing whitespace in string columns.
    pub strip_whitespace: bool,
    /// Lowercase column names and replace spaces with underscores.
    pub lowercase_columns: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            remove_duplicates: true,
            missing_strategy: MissingStrategy::Drop,
            strip_whitespace: true,
            lowercase_columns: true,
        }
    }
}

impl CleaningConfig {
    /// Default options with a different missing-value strategy.
    pub fn with_missing_strategy(mut self, strategy: MissingStrategy) -> Self {
        self.missing_strategy = strategy;
        self
    }

    pub fn with_remove_duplicates(mut self, enable: bool) -> Self {
        self.remove_duplicates = enable;
        self
    }

    pub fn with_strip_whitespace(mut self, enable: bool) -> Self {
        self.strip_whitespace = enable;
        self
    }

    pub fn with_lowercase_columns(mut self, enable: bool) -> Self {
        self.lowercase_columns = enable;
        self
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load options from a TOML file.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = CleaningConfig::default();
        assert!(config.remove_duplicates);
        assert_eq!(config.missing_strategy, MissingStrategy::Drop);
        assert!(config.strip_whitespace);
        assert!(config.lowercase_columns);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = CleaningConfig::from_toml_str("missing_strategy = \"fill_forward\"\n").unwrap();
        assert_eq!(config.missing_strategy, MissingStrategy::FillForward);
        assert!(config.remove_duplicates);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(CleaningConfig::from_toml_str("missing_strategy = \"interpolate\"\n").is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaning.toml");
        std::fs::write(&path, "strip_whitespace = false\nmissing_strategy = \"fill_mean\"\n")
            .unwrap();

        let config = CleaningConfig::from_toml_path(&path).unwrap();
        assert!(!config.strip_whitespace);
        assert_eq!(config.missing_strategy, MissingStrategy::FillMean);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = CleaningConfig::from_toml_path(Path::new("/nonexistent/cleaning.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
