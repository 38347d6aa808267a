//! Per-user order aggregation.

use std::collections::BTreeMap;

use basket_common::{any_to_f64, column_i64_values};
use basket_model::SourceTable;
use basket_model::columns::{DAYS_SINCE_PRIOR_ORDER, USER_ID};
use polars::prelude::{AnyValue, DataFrame};

use crate::error::MergeError;

/// Order activity of one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserOrderStats {
    pub user_id: i64,
    pub order_count: usize,
    /// Mean of the non-null `days_since_prior_order` values, if any.
    pub mean_days_between_orders: Option<f64>,
}

/// Aggregates orders per user, sorted by `user_id`.
///
/// Rows with a null `user_id` are skipped. An empty orders table yields no
/// stats even when it lacks a `user_id` column.
pub fn aggregate_user_orders(orders: &DataFrame) -> Result<Vec<UserOrderStats>, MergeError> {
    if orders.height() == 0 {
        return Ok(Vec::new());
    }
    let user_ids = column_i64_values(orders, USER_ID).ok_or(MergeError::MissingJoinKey {
        table: SourceTable::Orders,
        column: USER_ID,
    })?;
    let days = orders.column(DAYS_SINCE_PRIOR_ORDER).ok();

    // user_id -> (orders, day sum, day count)
    let mut totals: BTreeMap<i64, (usize, f64, usize)> = BTreeMap::new();
    for (idx, user_id) in user_ids.into_iter().enumerate() {
        let Some(user_id) = user_id else {
            continue;
        };
        let entry = totals.entry(user_id).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Some(column) = days
            && let Some(value) = any_to_f64(column.get(idx).unwrap_or(AnyValue::Null))
        {
            entry.1 += value;
            entry.2 += 1;
        }
    }

    Ok(totals
        .into_iter()
        .map(|(user_id, (order_count, day_sum, day_count))| UserOrderStats {
            user_id,
            order_count,
            mean_days_between_orders: (day_count > 0).then(|| day_sum / day_count as f64),
        })
        .collect())
}
