//! Validation report persisted next to the merged dataset.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Outcome of validating one merged dataset.
///
/// `schema_valid` is derived from the error list by the constructor and
/// cannot disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    timestamp: String,
    total_records: usize,
    validation_errors: Vec<String>,
    data_quality_metrics: BTreeMap<String, f64>,
    schema_valid: bool,
    file_size_mb: f64,
}

impl ValidationReport {
    /// Build a report stamped with the current time.
    pub fn new(
        total_records: usize,
        validation_errors: Vec<String>,
        data_quality_metrics: BTreeMap<String, f64>,
        file_size_bytes: u64,
    ) -> Self {
        Self::with_timestamp(
            Utc::now(),
            total_records,
            validation_errors,
            data_quality_metrics,
            file_size_bytes,
        )
    }

    /// Build a report with an explicit creation time.
    pub fn with_timestamp(
        timestamp: DateTime<Utc>,
        total_records: usize,
        validation_errors: Vec<String>,
        data_quality_metrics: BTreeMap<String, f64>,
        file_size_bytes: u64,
    ) -> Self {
        let schema_valid = validation_errors.is_empty();
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            total_records,
            validation_errors,
            data_quality_metrics,
            schema_valid,
            file_size_mb: round_mb(file_size_bytes),
        }
    }

    /// ISO-8601 creation time.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    pub fn data_quality_metrics(&self) -> &BTreeMap<String, f64> {
        &self.data_quality_metrics
    }

    pub fn schema_valid(&self) -> bool {
        self.schema_valid
    }

    /// Size of the persisted dataset in megabytes, two decimals.
    pub fn file_size_mb(&self) -> f64 {
        self.file_size_mb
    }

    pub fn error_count(&self) -> usize {
        self.validation_errors.len()
    }
}

fn round_mb(bytes: u64) -> f64 {
    let mb = bytes as f64 / BYTES_PER_MB;
    (mb * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metrics() -> BTreeMap<String, f64> {
        BTreeMap::from([("completeness_ratio".to_string(), 1.0)])
    }

    #[test]
    fn schema_valid_follows_errors() {
        let ok = ValidationReport::new(3, Vec::new(), metrics(), 0);
        assert!(ok.schema_valid());

        let bad = ValidationReport::new(3, vec!["Missing required column: aisle".into()], metrics(), 0);
        assert!(!bad.schema_valid());
        assert_eq!(bad.error_count(), 1);
    }

    #[test]
    fn file_size_is_rounded_to_two_decimals() {
        let report = ValidationReport::new(0, Vec::new(), BTreeMap::new(), 1_572_864 + 10_000);
        assert_eq!(report.file_size_mb(), 1.51);
    }

    #[test]
    fn serializes_with_stable_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let report = ValidationReport::with_timestamp(at, 2, Vec::new(), metrics(), 0);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["timestamp"], "2024-05-01T12:00:00.000000Z");
        assert_eq!(value["total_records"], 2);
        assert_eq!(value["schema_valid"], true);
        assert_eq!(value["file_size_mb"], 0.0);
        assert_eq!(value["data_quality_metrics"]["completeness_ratio"], 1.0);
        assert!(value["validation_errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn json_round_trip_preserves_report() {
        let report = ValidationReport::new(5, vec!["Duplicate order_id values found".into()], metrics(), 2048);
        let json = serde_json::to_string_pretty(&report).unwrap();
        let restored: ValidationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, report);
    }
}
