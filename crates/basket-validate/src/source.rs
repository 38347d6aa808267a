//! Data contracts of the raw source tables.
//!
//! These checks run on the tables as loaded, before merging. Their findings
//! are advisory: they are logged and shown in the run summary but do not
//! decide `schema_valid`.

use std::collections::HashSet;

use basket_common::{any_to_f64, any_to_string};
use basket_model::SourceTable;
use basket_model::columns::{
    ADD_TO_CART_ORDER, AISLE, AISLE_ID, DAYS_SINCE_PRIOR_ORDER, DEPARTMENT, DEPARTMENT_ID,
    EVAL_SETS, EVAL_SET, ORDER_DOW, ORDER_HOUR_OF_DAY, ORDER_ID, ORDER_NUMBER, PRODUCT_ID,
    PRODUCT_NAME, REORDERED, USER_ID,
};
use polars::prelude::{AnyValue, Column, DataFrame};

use crate::issue::Issue;

/// Constraint on the values of one column.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Numeric, inclusive bounds.
    Range { min: f64, max: Option<f64> },
    /// Text from a closed set.
    OneOf(&'static [&'static str]),
    /// Text with at least one character.
    NonEmpty,
}

#[derive(Debug, Clone, Copy)]
struct ColumnContract {
    column: &'static str,
    rule: Rule,
    nullable: bool,
    unique: bool,
}

const fn at_least(column: &'static str, min: f64) -> ColumnContract {
    ColumnContract {
        column,
        rule: Rule::Range { min, max: None },
        nullable: false,
        unique: false,
    }
}

const fn between(column: &'static str, min: f64, max: f64) -> ColumnContract {
    ColumnContract {
        column,
        rule: Rule::Range {
            min,
            max: Some(max),
        },
        nullable: false,
        unique: false,
    }
}

const fn text(column: &'static str) -> ColumnContract {
    ColumnContract {
        column,
        rule: Rule::NonEmpty,
        nullable: false,
        unique: false,
    }
}

const fn unique(contract: ColumnContract) -> ColumnContract {
    ColumnContract {
        unique: true,
        ..contract
    }
}

const fn nullable(contract: ColumnContract) -> ColumnContract {
    ColumnContract {
        nullable: true,
        ..contract
    }
}

const REORDERED_VALUES: &[&str] = &["0", "1"];

const AISLES: &[ColumnContract] = &[unique(at_least(AISLE_ID, 1.0)), text(AISLE)];

const DEPARTMENTS: &[ColumnContract] = &[unique(at_least(DEPARTMENT_ID, 1.0)), text(DEPARTMENT)];

const PRODUCTS: &[ColumnContract] = &[
    at_least(PRODUCT_ID, 1.0),
    text(PRODUCT_NAME),
    at_least(AISLE_ID, 1.0),
    at_least(DEPARTMENT_ID, 1.0),
];

const ORDERS: &[ColumnContract] = &[
    at_least(ORDER_ID, 1.0),
    at_least(USER_ID, 1.0),
    ColumnContract {
        column: EVAL_SET,
        rule: Rule::OneOf(&EVAL_SETS),
        nullable: false,
        unique: false,
    },
    at_least(ORDER_NUMBER, 1.0),
    between(ORDER_DOW, 0.0, 6.0),
    between(ORDER_HOUR_OF_DAY, 0.0, 23.0),
    nullable(at_least(DAYS_SINCE_PRIOR_ORDER, 0.0)),
];

const ORDER_PRODUCTS: &[ColumnContract] = &[
    at_least(ORDER_ID, 1.0),
    at_least(PRODUCT_ID, 1.0),
    at_least(ADD_TO_CART_ORDER, 1.0),
    ColumnContract {
        column: REORDERED,
        rule: Rule::OneOf(REORDERED_VALUES),
        nullable: false,
        unique: false,
    },
];

fn contracts(table: SourceTable) -> &'static [ColumnContract] {
    match table {
        SourceTable::Aisles => AISLES,
        SourceTable::Departments => DEPARTMENTS,
        SourceTable::Products => PRODUCTS,
        SourceTable::Orders => ORDERS,
        SourceTable::OrderProducts => ORDER_PRODUCTS,
    }
}

/// Check a raw source table against its data contract.
pub fn validate_source_table(table: SourceTable, df: &DataFrame) -> Vec<Issue> {
    let mut issues = Vec::new();
    for contract in contracts(table) {
        let Ok(column) = df.column(contract.column) else {
            issues.push(Issue::MissingColumn {
                column: contract.column.to_string(),
            });
            continue;
        };
        check_column(column, df.height(), contract, &mut issues);
    }
    if !issues.is_empty() {
        tracing::warn!(table = %table, issues = issues.len(), "source table contract violations");
    }
    issues
}

fn check_column(column: &Column, height: usize, contract: &ColumnContract, issues: &mut Vec<Issue>) {
    let name = contract.column.to_string();
    let null_count = column.null_count();
    if null_count > 0 && !contract.nullable {
        issues.push(Issue::NullValues {
            column: name.clone(),
            null_count,
        });
    }

    let mut violations = 0usize;
    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    for idx in 0..height {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        if matches!(value, AnyValue::Null) {
            continue;
        }
        if !satisfies(contract.rule, &value) {
            violations += 1;
        }
        if contract.unique && !seen.insert(any_to_string(value)) {
            duplicates += 1;
        }
    }

    if violations > 0 {
        issues.push(match contract.rule {
            Rule::Range { min, max } => Issue::OutOfRange {
                column: name.clone(),
                count: violations,
                expected: match max {
                    Some(max) => format!("[{min}, {max}]"),
                    None => format!(">= {min}"),
                },
            },
            Rule::OneOf(allowed) => Issue::NotInSet {
                column: name.clone(),
                count: violations,
                allowed: allowed.join(", "),
            },
            Rule::NonEmpty => Issue::EmptyText {
                column: name.clone(),
                count: violations,
            },
        });
    }
    if duplicates > 0 {
        issues.push(Issue::NotUnique {
            column: name,
            duplicates,
        });
    }
}

fn satisfies(rule: Rule, value: &AnyValue<'_>) -> bool {
    match rule {
        Rule::Range { min, max } => any_to_f64(value.clone())
            .is_some_and(|number| number >= min && max.is_none_or(|max| number <= max)),
        Rule::OneOf(allowed) => {
            let text = any_to_string(value.clone());
            allowed.contains(&text.as_str())
        }
        Rule::NonEmpty => !any_to_string(value.clone()).is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn valid_aisles_pass() {
        let df = DataFrame::new(vec![
            Series::new("aisle_id".into(), vec![1i64, 2]).into(),
            Series::new("aisle".into(), vec!["bakery", "frozen"]).into(),
        ])
        .unwrap();

        assert!(validate_source_table(SourceTable::Aisles, &df).is_empty());
    }

    #[test]
    fn aisle_ids_must_be_unique_and_positive() {
        let df = DataFrame::new(vec![
            Series::new("aisle_id".into(), vec![1i64, 1, 0]).into(),
            Series::new("aisle".into(), vec!["a", "b", ""]).into(),
        ])
        .unwrap();

        let issues = validate_source_table(SourceTable::Aisles, &df);

        assert_eq!(
            issues,
            vec![
                Issue::OutOfRange {
                    column: "aisle_id".into(),
                    count: 1,
                    expected: ">= 1".into(),
                },
                Issue::NotUnique {
                    column: "aisle_id".into(),
                    duplicates: 1,
                },
                Issue::EmptyText {
                    column: "aisle".into(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn order_rules() {
        let df = DataFrame::new(vec![
            Series::new("order_id".into(), vec![1i64, 2]).into(),
            Series::new("user_id".into(), vec![1i64, 1]).into(),
            Series::new("eval_set".into(), vec!["prior", "holdout"]).into(),
            Series::new("order_number".into(), vec![1i64, 2]).into(),
            Series::new("order_dow".into(), vec![0i64, 7]).into(),
            Series::new("order_hour_of_day".into(), vec![23i64, 8]).into(),
            Series::new("days_since_prior_order".into(), vec![None, Some(3.0f64)]).into(),
        ])
        .unwrap();

        let messages: Vec<String> = validate_source_table(SourceTable::Orders, &df)
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            messages,
            vec![
                "Column eval_set has 1 values not in {prior, train, test}",
                "Column order_dow has 1 values outside [0, 6]",
            ]
        );
    }

    #[test]
    fn missing_contract_column_is_reported() {
        let df = DataFrame::new(vec![Series::new("department_id".into(), vec![1i64]).into()])
            .unwrap();

        let issues = validate_source_table(SourceTable::Departments, &df);

        assert_eq!(
            issues,
            vec![Issue::MissingColumn {
                column: "department".into()
            }]
        );
    }
}
