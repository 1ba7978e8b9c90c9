use crate::models::{Food, Nutrient, NutritionTotals};
use crate::nutrition::constants::REFERENCE_QUANTITY_G;

/// Ratio between a serving and the 100g reference.
#[inline]
pub fn nutrition_factor(quantity: f64) -> f64 {
    quantity / REFERENCE_QUANTITY_G
}

/// Nutrition of the serving actually eaten.
///
/// Never fails: missing nutrients count as 0, a zero serving gives zero
/// totals and an unusable serving falls back to 100g. No rounding.
pub fn scale_food(food: &Food) -> NutritionTotals {
    let factor = nutrition_factor(food.effective_quantity());
    NutritionTotals {
        calories: food.reference_value(Nutrient::Calories) * factor,
        proteins: food.reference_value(Nutrient::Proteins) * factor,
        carbs: food.reference_value(Nutrient::Carbs) * factor,
        fats: food.reference_value(Nutrient::Fats) * factor,
    }
}

/// Nutrition of `food` at a provisional serving, e.g. while the user is typing.
pub fn preview_serving(food: &Food, quantity: f64) -> NutritionTotals {
    scale_food(&food.with_quantity(quantity))
}
