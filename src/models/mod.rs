mod food;
mod meal;
mod totals;

pub use food::Food;
pub use meal::{Meal, MealKind};
pub use totals::{Nutrient, NutritionTotals};
