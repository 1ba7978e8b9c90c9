use crate::models::{Food, Meal, NutritionTotals};
use crate::nutrition::scaler::scale_food;

/// Sum of the scaled nutrition of every food in the list.
pub fn foods_totals(foods: &[Food]) -> NutritionTotals {
    foods.iter().map(scale_food).sum()
}

/// Totals for one meal. An empty meal totals zero.
pub fn meal_totals(meal: &Meal) -> NutritionTotals {
    foods_totals(&meal.foods)
}

/// Totals across meals, typically the meals of one day.
///
/// Date filtering is up to the caller.
pub fn daily_totals<'a, I>(meals: I) -> NutritionTotals
where
    I: IntoIterator<Item = &'a Meal>,
{
    meals.into_iter().map(meal_totals).sum()
}

/// Fraction of the daily goal reached, clamped to [0, 1].
///
/// A non-positive or non-finite goal counts as reached.
pub fn progress_ratio(calories: f64, daily_goal: f64) -> f64 {
    if !daily_goal.is_finite() || daily_goal <= 0.0 {
        return 1.0;
    }
    let ratio = calories / daily_goal;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

/// Calories left before reaching the goal, never negative.
pub fn remaining_calories(calories: f64, daily_goal: f64) -> f64 {
    (daily_goal - calories).max(0.0)
}

/// One day's intake against the goal.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: String,
    pub meal_count: usize,
    pub totals: NutritionTotals,
    pub goal: f64,
    pub progress: f64,
    pub remaining_calories: f64,
}

impl DaySummary {
    /// Summarize meals already filtered to `date`.
    pub fn from_meals(date: impl Into<String>, meals: &[&Meal], goal: f64) -> Self {
        let totals = daily_totals(meals.iter().copied());
        Self {
            date: date.into(),
            meal_count: meals.len(),
            totals,
            goal,
            progress: progress_ratio(totals.calories, goal),
            remaining_calories: remaining_calories(totals.calories, goal),
        }
    }

    pub fn goal_reached(&self) -> bool {
        self.progress >= 1.0
    }
}
