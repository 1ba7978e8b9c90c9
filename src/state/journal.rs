use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};

use crate::dates::date_key;
use crate::error::{FoodTrackError, Result};
use crate::models::{Food, Meal, MealKind};
use crate::nutrition::DaySummary;
use crate::state::draft::validate_quantity;

/// In-memory list of logged meals.
///
/// Load it from a `MealStore`, change it, then hand `meals()` back to the store.
#[derive(Debug, Clone, Default)]
pub struct MealJournal {
    meals: Vec<Meal>,
}

impl MealJournal {
    pub fn new(meals: Vec<Meal>) -> Self {
        Self { meals }
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn into_meals(self) -> Vec<Meal> {
        self.meals
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Meals logged on the given day key, in logging order.
    pub fn meals_on(&self, date: &str) -> Vec<&Meal> {
        self.meals.iter().filter(|m| m.is_on(date)).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    /// Every day key with at least one meal, ascending.
    pub fn dates(&self) -> Vec<String> {
        self.meals
            .iter()
            .map(|m| m.date.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Log `foods` as the `kind` meal of `date`. Returns the new meal's id.
    ///
    /// A day holds at most one meal of each kind. Every food with a serving
    /// must have a valid one; foods without a serving count as 100g.
    pub fn log_meal(&mut self, kind: MealKind, date: NaiveDate, foods: Vec<Food>) -> Result<String> {
        if foods.is_empty() {
            return Err(FoodTrackError::EmptyMeal);
        }
        for food in &foods {
            if let Some(q) = food.quantity {
                validate_quantity(q)?;
            }
        }

        let date = date_key(date);
        let taken = self
            .meals_on(&date)
            .iter()
            .any(|m| m.kind() == Some(kind));
        if taken {
            return Err(FoodTrackError::DuplicateMeal {
                kind: kind.to_string(),
                date,
            });
        }

        let id = self.next_id(Utc::now().timestamp_millis());
        tracing::info!(%id, %kind, %date, foods = foods.len(), "logged meal");
        self.meals.push(Meal::new(id.clone(), kind.label(), date, foods));
        Ok(id)
    }

    /// Remove a meal by id.
    pub fn delete(&mut self, id: &str) -> Result<Meal> {
        let index = self
            .meals
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| FoodTrackError::MealNotFound(id.to_string()))?;
        tracing::info!(%id, "deleted meal");
        Ok(self.meals.remove(index))
    }

    /// Intake of one day against `goal`.
    pub fn summarize_day(&self, date: &str, goal: f64) -> DaySummary {
        DaySummary::from_meals(date, &self.meals_on(date), goal)
    }

    /// Millisecond timestamp id, bumped past any numeric id already in use.
    fn next_id(&self, now_millis: i64) -> String {
        let highest = self
            .meals
            .iter()
            .filter_map(|m| m.id.parse::<i64>().ok())
            .max();
        let id = match highest {
            Some(h) if h >= now_millis => h + 1,
            _ => now_millis,
        };
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn rice() -> Food {
        Food::new("rice", "Rice")
            .with_reference(130.0, 2.7, 28.0, 0.3)
            .with_quantity(200.0)
    }

    #[test]
    fn test_log_and_filter_by_day() {
        let mut journal = MealJournal::default();
        journal.log_meal(MealKind::Lunch, day(17), vec![rice()]).unwrap();
        journal.log_meal(MealKind::Lunch, day(18), vec![rice()]).unwrap();
        journal.log_meal(MealKind::Dinner, day(18), vec![rice()]).unwrap();

        assert_eq!(journal.len(), 3);
        assert_eq!(journal.meals_on("2026-10-18").len(), 2);
        assert_eq!(journal.meals_on("2026-10-17").len(), 1);
        assert!(journal.meals_on("2026-10-16").is_empty());
        assert_eq!(journal.dates(), vec!["2026-10-17", "2026-10-18"]);
    }

    #[test]
    fn test_rejects_empty_meal() {
        let mut journal = MealJournal::default();
        assert!(matches!(
            journal.log_meal(MealKind::Snack, day(18), vec![]),
            Err(FoodTrackError::EmptyMeal)
        ));
    }

    #[test]
    fn test_rejects_second_meal_of_same_kind() {
        let mut journal = MealJournal::default();
        journal.log_meal(MealKind::Breakfast, day(18), vec![rice()]).unwrap();

        let err = journal
            .log_meal(MealKind::Breakfast, day(18), vec![rice()])
            .unwrap_err();
        assert!(matches!(err, FoodTrackError::DuplicateMeal { .. }));
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn test_rejects_invalid_quantity() {
        let mut journal = MealJournal::default();

        for q in [0.0, -50.0, f64::NAN] {
            let err = journal
                .log_meal(MealKind::Lunch, day(18), vec![rice(), rice().with_quantity(q)])
                .unwrap_err();
            assert!(matches!(err, FoodTrackError::InvalidQuantity(_)));
        }
        assert!(journal.is_empty());

        let mut unset = rice();
        unset.quantity = None;
        journal.log_meal(MealKind::Lunch, day(18), vec![unset]).unwrap();
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut journal = MealJournal::default();
        let a = journal.log_meal(MealKind::Breakfast, day(18), vec![rice()]).unwrap();
        let b = journal.log_meal(MealKind::Lunch, day(18), vec![rice()]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_id_bumps_past_existing() {
        let journal = MealJournal::new(vec![Meal::new("5000", "Lunch", "2026-10-18", vec![])]);
        assert_eq!(journal.next_id(4000), "5001");
        assert_eq!(journal.next_id(9000), "9000");
    }

    #[test]
    fn test_delete() {
        let mut journal = MealJournal::default();
        let id = journal.log_meal(MealKind::Dinner, day(18), vec![rice()]).unwrap();

        let removed = journal.delete(&id).unwrap();
        assert_eq!(removed.name, "Dinner");
        assert!(journal.is_empty());
        assert!(matches!(journal.delete(&id), Err(FoodTrackError::MealNotFound(_))));
    }

    #[test]
    fn test_summarize_day_only_counts_that_day() {
        let mut journal = MealJournal::default();
        journal.log_meal(MealKind::Lunch, day(17), vec![rice()]).unwrap();
        journal.log_meal(MealKind::Lunch, day(18), vec![rice()]).unwrap();

        let summary = journal.summarize_day("2026-10-18", 2000.0);
        assert_eq!(summary.meal_count, 1);
        assert!((summary.totals.calories - 260.0).abs() < 1e-9);
    }
}
