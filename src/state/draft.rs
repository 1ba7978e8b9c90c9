use crate::error::{FoodTrackError, Result};
use crate::models::{Food, NutritionTotals};
use crate::nutrition::foods_totals;

/// Parse a serving typed by the user. Accepts `,` as decimal separator.
pub fn parse_quantity(input: &str) -> Result<f64> {
    let normalized = input.trim().replace(',', ".");
    let quantity: f64 = normalized
        .parse()
        .map_err(|_| FoodTrackError::InvalidQuantity(input.trim().to_string()))?;
    validate_quantity(quantity)
}

/// A serving must be a finite number of grams above zero.
pub fn validate_quantity(quantity: f64) -> Result<f64> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(quantity)
    } else {
        Err(FoodTrackError::InvalidQuantity(quantity.to_string()))
    }
}

/// The meal being composed, before it is logged.
///
/// Every food held here has a validated serving and a unique id.
#[derive(Debug, Clone, Default)]
pub struct MealDraft {
    foods: Vec<Food>,
}

impl MealDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a persisted draft.
    ///
    /// Foods without a serving get the 100g default; foods with an invalid
    /// serving are dropped.
    pub fn from_foods(foods: Vec<Food>) -> Self {
        let foods = foods
            .into_iter()
            .filter_map(|food| match food.quantity {
                Some(q) if validate_quantity(q).is_err() => {
                    tracing::warn!(id = %food.id, quantity = q, "dropping draft food with invalid quantity");
                    None
                }
                Some(_) => Some(food),
                None => {
                    let q = food.effective_quantity();
                    Some(food.with_quantity(q))
                }
            })
            .collect();
        Self { foods }
    }

    pub fn contains(&self, food_id: &str) -> bool {
        self.foods.iter().any(|f| f.id == food_id)
    }

    /// Add `food` with a serving of `quantity` grams.
    pub fn add_food(&mut self, food: &Food, quantity: f64) -> Result<()> {
        let quantity = validate_quantity(quantity)?;
        if self.contains(&food.id) {
            return Err(FoodTrackError::DuplicateFood(food.name.clone()));
        }
        self.foods.push(food.with_quantity(quantity));
        tracing::debug!(id = %food.id, quantity, "added food to draft");
        Ok(())
    }

    pub fn remove_food(&mut self, food_id: &str) -> Result<Food> {
        let index = self
            .foods
            .iter()
            .position(|f| f.id == food_id)
            .ok_or_else(|| FoodTrackError::FoodNotFound(food_id.to_string()))?;
        Ok(self.foods.remove(index))
    }

    pub fn set_quantity(&mut self, food_id: &str, quantity: f64) -> Result<()> {
        let quantity = validate_quantity(quantity)?;
        let food = self
            .foods
            .iter_mut()
            .find(|f| f.id == food_id)
            .ok_or_else(|| FoodTrackError::FoodNotFound(food_id.to_string()))?;
        food.quantity = Some(quantity);
        Ok(())
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn into_foods(self) -> Vec<Food> {
        self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Running totals shown while composing.
    pub fn totals(&self) -> NutritionTotals {
        foods_totals(&self.foods)
    }

    pub fn clear(&mut self) {
        self.foods.clear();
    }
}
