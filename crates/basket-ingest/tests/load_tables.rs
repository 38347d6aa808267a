use std::fs;
use std::path::Path;

use basket_ingest::{IngestError, LoadOptions, load_source_tables};
use tempfile::TempDir;

fn write_sources(dir: &Path, orders: &str) {
    fs::write(dir.join("aisles.csv"), "aisle_id,aisle\n1,bakery\n").expect("write aisles");
    fs::write(
        dir.join("departments.csv"),
        "department_id,department\n2,frozen\n",
    )
    .expect("write departments");
    fs::write(
        dir.join("products.csv"),
        "product_id,product_name,aisle_id,department_id\n10,Bread,1,2\n11,Ice Cream,1,2\n",
    )
    .expect("write products");
    fs::write(dir.join("orders.csv"), orders).expect("write orders");
}

#[test]
fn loads_all_reference_tables() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(
        dir.path(),
        "order_id,user_id,days_since_prior_order\n1,7,\n2,7,3.0\n",
    );

    let tables = load_source_tables(dir.path(), LoadOptions::default()).expect("load");

    assert_eq!(tables.aisles.height(), 1);
    assert_eq!(tables.departments.height(), 1);
    assert_eq!(tables.products.height(), 2);
    assert_eq!(tables.orders.height(), 2);
    assert_eq!(tables.total_rows(), 6);
}

#[test]
fn order_row_cap_truncates_orders_only() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(dir.path(), "order_id,user_id\n1,7\n2,8\n3,9\n");

    let options = LoadOptions::default().with_order_row_cap(Some(1));
    let tables = load_source_tables(dir.path(), options).expect("load");

    assert_eq!(tables.orders.height(), 1);
    assert_eq!(tables.products.height(), 2);
}

#[test]
fn missing_products_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    write_sources(dir.path(), "order_id,user_id\n1,7\n");
    fs::remove_file(dir.path().join("products.csv")).expect("remove products");

    let err = load_source_tables(dir.path(), LoadOptions::default()).unwrap_err();

    match err {
        IngestError::MissingFile { path } => assert!(path.ends_with("products.csv")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_directory_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = load_source_tables(&dir.path().join("absent"), LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}
