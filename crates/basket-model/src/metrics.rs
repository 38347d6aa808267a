//! Keys of the data quality metrics map.

pub const COMPLETENESS_RATIO: &str = "completeness_ratio";
pub const PRODUCT_ID_UNIQUENESS: &str = "product_id_uniqueness";
pub const VALID_PRODUCT_NAMES_RATIO: &str = "valid_product_names_ratio";
pub const AVG_PRODUCT_NAME_LENGTH: &str = "avg_product_name_length";
pub const MAX_PRODUCT_NAME_LENGTH: &str = "max_product_name_length";

/// Metrics that are ratios and therefore bounded by `[0, 1]`.
pub const RATIO_KEYS: [&str; 3] = [
    COMPLETENESS_RATIO,
    PRODUCT_ID_UNIQUENESS,
    VALID_PRODUCT_NAMES_RATIO,
];
