//! Round trips of the persisted outputs.

use std::collections::BTreeMap;
use std::fs;

use basket_model::ValidationReport;
use basket_report::{
    MERGED_FILE_NAME, REPORT_FILE_NAME, load_merged_table, load_validation_report,
    save_merged_table, save_validation_report, stage_merged_table, stage_validation_report,
};
use basket_transform::{MergedTable, merge};
use chrono::{TimeZone, Utc};
use polars::prelude::{DataFrame, NamedFrom, Series};
use tempfile::tempdir;

fn merged() -> MergedTable {
    let df = DataFrame::new(vec![
        Series::new("product_id".into(), vec![1i64, 2]).into(),
        Series::new("product_name".into(), vec!["Bread", "Chips, Salted"]).into(),
        Series::new("has_special_chars".into(), vec![false, true]).into(),
        Series::new("aisle".into(), vec![Some("bakery"), None]).into(),
    ])
    .unwrap();
    MergedTable::from_data(df)
}

fn report() -> ValidationReport {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    ValidationReport::with_timestamp(
        timestamp,
        2,
        Vec::new(),
        BTreeMap::from([("completeness_ratio".to_string(), 0.875)]),
        1_572_864,
    )
}

#[test]
fn merged_table_csv_layout() {
    let dir = tempdir().unwrap();

    let path = save_merged_table(dir.path(), &merged()).unwrap();

    assert_eq!(path.file_name().unwrap(), MERGED_FILE_NAME);
    insta::assert_snapshot!(fs::read_to_string(&path).unwrap(), @r#"
    product_id,product_name,has_special_chars,aisle
    1,Bread,false,bakery
    2,"Chips, Salted",true,
    "#);
}

#[test]
fn merged_table_round_trips() {
    let dir = tempdir().unwrap();
    let table = merged();

    save_merged_table(dir.path(), &table).unwrap();
    let loaded = load_merged_table(dir.path()).unwrap();

    assert!(loaded.equals_missing(table.data()));
}

fn reference_tables() -> (DataFrame, DataFrame) {
    let aisles = DataFrame::new(vec![
        Series::new("aisle_id".into(), vec![1i64]).into(),
        Series::new("aisle".into(), vec!["bakery"]).into(),
    ])
    .unwrap();
    let departments = DataFrame::new(vec![
        Series::new("department_id".into(), vec![1i64]).into(),
        Series::new("department".into(), vec!["frozen"]).into(),
    ])
    .unwrap();
    (aisles, departments)
}

fn assert_round_trip(table: &MergedTable) {
    let dir = tempdir().unwrap();

    save_merged_table(dir.path(), table).unwrap();
    let loaded = load_merged_table(dir.path()).unwrap();

    assert_eq!(loaded.schema(), table.data().schema());
    assert!(loaded.equals_missing(table.data()));
}

#[test]
fn merged_product_without_name_round_trips() {
    let (aisles, departments) = reference_tables();
    let products = DataFrame::new(vec![
        Series::new("product_id".into(), vec![1i64]).into(),
        Series::new("product_name".into(), vec![None::<&str>]).into(),
        Series::new("aisle_id".into(), vec![1i64]).into(),
        Series::new("department_id".into(), vec![1i64]).into(),
    ])
    .unwrap();

    let table = merge(&aisles, &departments, &products, &DataFrame::empty()).unwrap();

    assert_round_trip(&table);
}

#[test]
fn merged_unmatched_aisle_round_trips() {
    let (aisles, departments) = reference_tables();
    let products = DataFrame::new(vec![
        Series::new("product_id".into(), vec![1i64, 2]).into(),
        Series::new("product_name".into(), vec!["Bread", "Ben & Jerry's"]).into(),
        Series::new("aisle_id".into(), vec![1i64, 9]).into(),
        Series::new("department_id".into(), vec![1i64, 1]).into(),
    ])
    .unwrap();

    let table = merge(&aisles, &departments, &products, &DataFrame::empty()).unwrap();

    assert_round_trip(&table);
}

#[test]
fn merged_empty_products_round_trip() {
    let (aisles, departments) = reference_tables();
    // A header-only products file loads with text columns.
    let products = DataFrame::new(
        ["product_id", "product_name", "aisle_id", "department_id"]
            .into_iter()
            .map(|name| Series::new(name.into(), Vec::<Option<&str>>::new()).into())
            .collect(),
    )
    .unwrap();

    let table = merge(&aisles, &departments, &products, &DataFrame::empty()).unwrap();

    assert_eq!(table.data().height(), 0);
    assert_round_trip(&table);
}

#[test]
fn report_json_layout() {
    let dir = tempdir().unwrap();

    let path = save_validation_report(dir.path(), &report()).unwrap();

    assert_eq!(path.file_name().unwrap(), REPORT_FILE_NAME);
    insta::assert_snapshot!(fs::read_to_string(&path).unwrap(), @r#"
    {
      "timestamp": "2024-01-02T03:04:05.000000Z",
      "total_records": 2,
      "validation_errors": [],
      "data_quality_metrics": {
        "completeness_ratio": 0.875
      },
      "schema_valid": true,
      "file_size_mb": 1.5
    }
    "#);
}

#[test]
fn report_round_trips() {
    let dir = tempdir().unwrap();
    let report = report();

    save_validation_report(dir.path(), &report).unwrap();

    assert_eq!(load_validation_report(dir.path()).unwrap(), report);
}

#[test]
fn staged_outputs_do_not_touch_previous_files_until_commit() {
    let dir = tempdir().unwrap();
    save_merged_table(dir.path(), &merged()).unwrap();
    save_validation_report(dir.path(), &report()).unwrap();
    let before = fs::read_to_string(dir.path().join(MERGED_FILE_NAME)).unwrap();

    let single = MergedTable::from_data(merged().data().head(Some(1)));
    let staged_table = stage_merged_table(dir.path(), &single).unwrap();
    let staged_report = stage_validation_report(dir.path(), &report()).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join(MERGED_FILE_NAME)).unwrap(),
        before
    );

    // Abandoning the stage keeps the previous outputs intact.
    drop(staged_table);
    drop(staged_report);
    assert_eq!(
        fs::read_to_string(dir.path().join(MERGED_FILE_NAME)).unwrap(),
        before
    );
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn committed_stage_overwrites_previous_output() {
    let dir = tempdir().unwrap();
    save_merged_table(dir.path(), &merged()).unwrap();

    let single = MergedTable::from_data(merged().data().head(Some(1)));
    stage_merged_table(dir.path(), &single)
        .unwrap()
        .commit()
        .unwrap();

    assert_eq!(load_merged_table(dir.path()).unwrap().height(), 1);
}
