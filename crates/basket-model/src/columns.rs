//! Column names used across the pipeline.

pub const PRODUCT_ID: &str = "product_id";
pub const PRODUCT_NAME: &str = "product_name";
pub const AISLE_ID: &str = "aisle_id";
pub const AISLE: &str = "aisle";
pub const DEPARTMENT_ID: &str = "department_id";
pub const DEPARTMENT: &str = "department";

pub const ORDER_ID: &str = "order_id";
pub const USER_ID: &str = "user_id";
pub const EVAL_SET: &str = "eval_set";
pub const ORDER_NUMBER: &str = "order_number";
pub const ORDER_DOW: &str = "order_dow";
pub const ORDER_HOUR_OF_DAY: &str = "order_hour_of_day";
pub const DAYS_SINCE_PRIOR_ORDER: &str = "days_since_prior_order";
pub const ADD_TO_CART_ORDER: &str = "add_to_cart_order";
pub const REORDERED: &str = "reordered";

// Derived by the merger.
pub const PRODUCT_NAME_LENGTH: &str = "product_name_length";
pub const HAS_SPECIAL_CHARS: &str = "has_special_chars";
pub const SAMPLE_USER_ORDERS: &str = "sample_user_orders";
pub const ESTIMATED_POPULARITY: &str = "estimated_popularity";

/// Columns appended to the product backbone, in output order.
pub const MERGED_APPENDED: [&str; 6] = [
    AISLE,
    DEPARTMENT,
    PRODUCT_NAME_LENGTH,
    HAS_SPECIAL_CHARS,
    SAMPLE_USER_ORDERS,
    ESTIMATED_POPULARITY,
];

/// Columns the merged dataset must carry.
pub const REQUIRED: [&str; 7] = [
    PRODUCT_ID,
    PRODUCT_NAME,
    AISLE_ID,
    DEPARTMENT_ID,
    AISLE,
    DEPARTMENT,
    PRODUCT_NAME_LENGTH,
];

/// Identifier columns that must hold a numeric type.
pub const NUMERIC_IDS: [&str; 3] = [PRODUCT_ID, AISLE_ID, DEPARTMENT_ID];

/// Columns that must not contain nulls.
pub const CRITICAL: [&str; 4] = [PRODUCT_ID, PRODUCT_NAME, AISLE_ID, DEPARTMENT_ID];

/// Allowed values of `orders.eval_set`.
pub const EVAL_SETS: [&str; 3] = ["prior", "train", "test"];
