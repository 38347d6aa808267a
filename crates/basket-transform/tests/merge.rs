use basket_transform::{MergeError, merge};
use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom, Series};
use proptest::prelude::*;

fn df(columns: Vec<Column>) -> DataFrame {
    DataFrame::new(columns).expect("dataframe")
}

fn aisles() -> DataFrame {
    df(vec![
        Series::new("aisle_id".into(), vec![1i64]).into(),
        Series::new("aisle".into(), vec!["bakery"]).into(),
    ])
}

fn departments() -> DataFrame {
    df(vec![
        Series::new("department_id".into(), vec![2i64]).into(),
        Series::new("department".into(), vec!["frozen"]).into(),
    ])
}

fn orders() -> DataFrame {
    df(vec![
        Series::new("order_id".into(), vec![100i64, 101]).into(),
        Series::new("user_id".into(), vec![5i64, 5]).into(),
    ])
}

#[test]
fn single_product_is_denormalized() {
    let products = df(vec![
        Series::new("product_id".into(), vec![10i64]).into(),
        Series::new("product_name".into(), vec!["Bread"]).into(),
        Series::new("aisle_id".into(), vec![1i64]).into(),
        Series::new("department_id".into(), vec![2i64]).into(),
    ]);

    let merged = merge(&aisles(), &departments(), &products, &orders()).expect("merge");
    let data = merged.data();

    assert_eq!(data.height(), 1);
    assert_eq!(
        data.get_column_names_str(),
        vec![
            "product_id",
            "product_name",
            "aisle_id",
            "department_id",
            "aisle",
            "department",
            "product_name_length",
            "has_special_chars",
            "sample_user_orders",
            "estimated_popularity",
        ]
    );
    let value = |name: &str| data.column(name).expect(name).get(0).expect("row 0");
    assert_eq!(value("aisle"), AnyValue::String("bakery"));
    assert_eq!(value("department"), AnyValue::String("frozen"));
    assert_eq!(value("product_name_length"), AnyValue::Int64(5));
    assert_eq!(value("has_special_chars"), AnyValue::Boolean(false));
    assert_eq!(value("sample_user_orders"), AnyValue::Int64(1));
    assert_eq!(value("estimated_popularity"), AnyValue::Int64(10));
    assert_eq!(merged.stats().users, 1);
}

#[test]
fn null_aisle_id_keeps_row_with_null_aisle() {
    let products = df(vec![
        Series::new("product_id".into(), vec![10i64, 11]).into(),
        Series::new("product_name".into(), vec![Some("Bread"), None]).into(),
        Series::new("aisle_id".into(), vec![None, Some(1i64)]).into(),
        Series::new("department_id".into(), vec![2i64, 99]).into(),
    ]);

    let merged = merge(&aisles(), &departments(), &products, &orders()).expect("merge");
    let data = merged.data();

    assert_eq!(data.height(), 2);
    let aisle = data.column("aisle").expect("aisle");
    assert_eq!(aisle.get(0).expect("row 0"), AnyValue::Null);
    assert_eq!(aisle.get(1).expect("row 1"), AnyValue::String("bakery"));
    let department = data.column("department").expect("department");
    assert_eq!(department.get(1).expect("row 1"), AnyValue::Null);

    // Null names give a null length and no special characters.
    let length = data.column("product_name_length").expect("length");
    assert_eq!(length.get(1).expect("row 1"), AnyValue::Null);
    let special = data.column("has_special_chars").expect("special");
    assert_eq!(special.get(1).expect("row 1"), AnyValue::Boolean(false));

    assert_eq!(merged.stats().unmatched_aisles, 1);
    assert_eq!(merged.stats().unmatched_departments, 1);
}

#[test]
fn name_length_counts_characters_not_bytes() {
    let products = df(vec![
        Series::new("product_id".into(), vec![-3i64]).into(),
        Series::new("product_name".into(), vec!["Crème"]).into(),
        Series::new("aisle_id".into(), vec![1i64]).into(),
        Series::new("department_id".into(), vec![2i64]).into(),
    ]);

    let merged = merge(&aisles(), &departments(), &products, &orders()).expect("merge");
    let data = merged.data();

    let value = |name: &str| data.column(name).expect(name).get(0).expect("row 0");
    assert_eq!(value("product_name_length"), AnyValue::Int64(5));
    assert_eq!(value("has_special_chars"), AnyValue::Boolean(true));
    assert_eq!(value("estimated_popularity"), AnyValue::Int64(97));
}

#[test]
fn empty_products_give_empty_merge() {
    let products = df(vec![
        Series::new("product_id".into(), Vec::<i64>::new()).into(),
        Series::new("product_name".into(), Vec::<String>::new()).into(),
        Series::new("aisle_id".into(), Vec::<i64>::new()).into(),
        Series::new("department_id".into(), Vec::<i64>::new()).into(),
    ]);

    let merged = merge(&aisles(), &departments(), &products, &DataFrame::empty()).expect("merge");

    assert_eq!(merged.record_count(), 0);
    assert_eq!(merged.data().width(), 10);
}

#[test]
fn missing_reference_key_is_fatal() {
    let products = df(vec![
        Series::new("product_id".into(), vec![10i64]).into(),
        Series::new("aisle_id".into(), vec![1i64]).into(),
        Series::new("department_id".into(), vec![2i64]).into(),
    ]);
    let broken_aisles = df(vec![Series::new("aisle".into(), vec!["bakery"]).into()]);

    let err = merge(&broken_aisles, &departments(), &products, &orders()).unwrap_err();

    assert!(err.to_string().contains("aisle_id"));
    assert!(matches!(err, MergeError::MissingJoinKey { .. }));
}

#[test]
fn missing_product_department_id_is_fatal() {
    let products = df(vec![
        Series::new("product_id".into(), vec![10i64]).into(),
        Series::new("aisle_id".into(), vec![1i64]).into(),
    ]);

    let err = merge(&aisles(), &departments(), &products, &orders()).unwrap_err();

    assert!(matches!(
        err,
        MergeError::MissingJoinKey {
            column: "department_id",
            ..
        }
    ));
}

proptest! {
    #[test]
    fn merged_rows_equal_product_rows(
        product_aisles in prop::collection::vec(prop::option::of(0i64..6), 0..40),
        reference_ids in prop::collection::vec(0i64..6, 0..10),
    ) {
        let height = product_aisles.len();
        let products = df(vec![
            Series::new("product_id".into(), (0..height as i64).collect::<Vec<_>>()).into(),
            Series::new("product_name".into(), vec!["item"; height]).into(),
            Series::new("aisle_id".into(), product_aisles.clone()).into(),
            Series::new("department_id".into(), product_aisles).into(),
        ]);
        let names: Vec<String> = reference_ids.iter().map(|id| format!("ref-{id}")).collect();
        let aisles = df(vec![
            Series::new("aisle_id".into(), reference_ids.clone()).into(),
            Series::new("aisle".into(), names.clone()).into(),
        ]);
        let departments = df(vec![
            Series::new("department_id".into(), reference_ids).into(),
            Series::new("department".into(), names).into(),
        ]);

        let merged = merge(&aisles, &departments, &products, &DataFrame::empty()).expect("merge");

        prop_assert_eq!(merged.record_count(), height);
    }
}
