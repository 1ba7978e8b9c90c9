pub mod cli;
pub mod dates;
pub mod error;
pub mod export;
pub mod interface;
pub mod lookup;
pub mod models;
pub mod nutrition;
pub mod state;

pub use error::{FoodTrackError, Result};
pub use models::{Food, Meal, MealKind, NutritionTotals};
pub use nutrition::{daily_totals, meal_totals, progress_ratio, scale_food};
