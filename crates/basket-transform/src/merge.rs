//! Denormalizing merge of the reference tables.
//!
//! `products` is the row backbone. Aisle and department names are attached
//! with left joins on their integer ids, so the merged table always has
//! exactly one row per product, in product order.
//!
//! `sample_user_orders` and `estimated_popularity` are placeholder
//! statistics derived from row position and product id. Orders are
//! aggregated per user for logging but are not joined onto products.

use std::collections::HashMap;
use std::time::Instant;

use basket_common::{column_i64_values, column_string_values};
use basket_model::SourceTable;
use basket_model::columns::{
    AISLE, AISLE_ID, DEPARTMENT, DEPARTMENT_ID, ESTIMATED_POPULARITY, HAS_SPECIAL_CHARS,
    MERGED_APPENDED, PRODUCT_ID, PRODUCT_NAME, PRODUCT_NAME_LENGTH, SAMPLE_USER_ORDERS,
};
use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::{debug, info, info_span, warn};

use crate::error::MergeError;
use crate::frame::{MergeStats, MergedTable};
use crate::orders::aggregate_user_orders;

/// Cycle length of the `sample_user_orders` placeholder.
const SAMPLE_ORDER_CYCLE: usize = 20;
/// Modulus of the `estimated_popularity` placeholder.
const POPULARITY_MODULUS: i64 = 100;

/// Joins aisles and departments onto products and appends derived columns.
pub fn merge(
    aisles: &DataFrame,
    departments: &DataFrame,
    products: &DataFrame,
    orders: &DataFrame,
) -> Result<MergedTable, MergeError> {
    let span = info_span!("merge", products = products.height());
    let _guard = span.enter();
    let start = Instant::now();

    let aisle_lookup = build_lookup(aisles, SourceTable::Aisles, AISLE_ID, AISLE)?;
    let department_lookup =
        build_lookup(departments, SourceTable::Departments, DEPARTMENT_ID, DEPARTMENT)?;
    let product_aisles = required_ids(products, AISLE_ID)?;
    let product_departments = required_ids(products, DEPARTMENT_ID)?;

    let user_orders = aggregate_user_orders(orders)?;

    let height = products.height();
    let aisle_names = resolve(&product_aisles, &aisle_lookup);
    let department_names = resolve(&product_departments, &department_lookup);
    let unmatched_aisles = aisle_names.iter().filter(|name| name.is_none()).count();
    let unmatched_departments = department_names.iter().filter(|name| name.is_none()).count();

    let names = column_string_values(products, PRODUCT_NAME).unwrap_or_else(|| vec![None; height]);
    let product_ids = column_i64_values(products, PRODUCT_ID).unwrap_or_else(|| vec![None; height]);

    let name_lengths: Vec<Option<i64>> = names
        .iter()
        .map(|name| name.as_deref().map(|text| text.chars().count() as i64))
        .collect();
    let special_chars: Vec<bool> = names
        .iter()
        .map(|name| name.as_deref().is_some_and(has_special_chars))
        .collect();
    let sample_orders: Vec<i64> = (0..height)
        .map(|idx| (idx % SAMPLE_ORDER_CYCLE + 1) as i64)
        .collect();
    let popularity: Vec<Option<i64>> = product_ids
        .iter()
        .map(|id| id.map(|value| value.rem_euclid(POPULARITY_MODULUS)))
        .collect();

    let mut data = products.clone();
    for name in MERGED_APPENDED {
        if data.column(name).is_ok() {
            debug!(column = name, "replacing existing products column");
            data.drop_in_place(name)?;
        }
    }
    data.with_column(Series::new(AISLE.into(), aisle_names))?;
    data.with_column(Series::new(DEPARTMENT.into(), department_names))?;
    data.with_column(Series::new(PRODUCT_NAME_LENGTH.into(), name_lengths))?;
    data.with_column(Series::new(HAS_SPECIAL_CHARS.into(), special_chars))?;
    data.with_column(Series::new(SAMPLE_USER_ORDERS.into(), sample_orders))?;
    data.with_column(Series::new(ESTIMATED_POPULARITY.into(), popularity))?;

    let stats = MergeStats {
        products: height,
        unmatched_aisles,
        unmatched_departments,
        orders_considered: orders.height(),
        users: user_orders.len(),
    };
    if unmatched_aisles > 0 || unmatched_departments > 0 {
        warn!(
            unmatched_aisles,
            unmatched_departments, "products without a matching aisle or department"
        );
    }
    info!(
        rows = data.height(),
        columns = data.width(),
        users = stats.users,
        orders = stats.orders_considered,
        duration_ms = start.elapsed().as_millis(),
        "merge complete"
    );
    Ok(MergedTable::new(data, stats))
}

/// Whether a product name contains a character other than an ASCII letter,
/// an ASCII digit, or whitespace.
pub fn has_special_chars(name: &str) -> bool {
    name.chars()
        .any(|ch| !(ch.is_ascii_alphanumeric() || ch.is_whitespace()))
}

/// Maps reference ids to names. The first row for an id wins.
fn build_lookup(
    table: &DataFrame,
    source: SourceTable,
    key: &'static str,
    value: &'static str,
) -> Result<HashMap<i64, Option<String>>, MergeError> {
    let ids = column_i64_values(table, key).ok_or(MergeError::MissingJoinKey {
        table: source,
        column: key,
    })?;
    let names = column_string_values(table, value).ok_or(MergeError::MissingJoinKey {
        table: source,
        column: value,
    })?;
    let mut lookup = HashMap::with_capacity(ids.len());
    let mut repeated = 0usize;
    for (id, name) in ids.into_iter().zip(names) {
        let Some(id) = id else {
            continue;
        };
        if lookup.contains_key(&id) {
            repeated += 1;
            continue;
        }
        lookup.insert(id, name);
    }
    if repeated > 0 {
        warn!(table = %source, key, repeated, "repeated reference keys ignored");
    }
    Ok(lookup)
}

fn required_ids(products: &DataFrame, key: &'static str) -> Result<Vec<Option<i64>>, MergeError> {
    column_i64_values(products, key).ok_or(MergeError::MissingJoinKey {
        table: SourceTable::Products,
        column: key,
    })
}

fn resolve(ids: &[Option<i64>], lookup: &HashMap<i64, Option<String>>) -> Vec<Option<String>> {
    ids.iter()
        .map(|id| id.and_then(|value| lookup.get(&value).cloned().flatten()))
        .collect()
}
