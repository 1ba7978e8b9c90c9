pub mod aggregator;
pub mod constants;
pub mod scaler;

pub use aggregator::{
    daily_totals, foods_totals, meal_totals, progress_ratio, remaining_calories, DaySummary,
};
pub use constants::*;
pub use scaler::{nutrition_factor, preview_serving, scale_food};
