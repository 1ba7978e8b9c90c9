/// Grams that reference nutrient values are expressed for.
pub const REFERENCE_QUANTITY_G: f64 = 100.0;

/// Daily calorie goal used when none is stored or the stored one is unusable.
pub const DEFAULT_CALORIE_GOAL: f64 = 2000.0;

/// Absolute tolerance when comparing aggregated totals.
pub const TOTALS_TOLERANCE: f64 = 1e-9;
