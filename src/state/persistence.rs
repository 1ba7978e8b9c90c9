use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{FoodTrackError, Result};
use crate::models::{Food, Meal};
use crate::nutrition::DEFAULT_CALORIE_GOAL;

const MEALS_FILE: &str = "meals.json";
const GOAL_FILE: &str = "calorie_goal.json";
const DRAFT_FILE: &str = "current_meal.json";

/// Logged meals, all days together.
pub trait MealStore {
    /// Every stored meal in insertion order; empty on first run.
    fn load_meals(&self) -> Result<Vec<Meal>>;

    /// Replace the stored meals with `meals`.
    fn save_meals(&self, meals: &[Meal]) -> Result<()>;
}

/// Daily calorie goal.
pub trait GoalStore {
    /// Stored goal, or the default when unset or unusable.
    fn load_goal(&self) -> f64;

    fn save_goal(&self, goal: f64) -> Result<f64>;
}

/// Foods of the meal being composed.
pub trait DraftStore {
    fn load_draft(&self) -> Result<Vec<Food>>;

    fn save_draft(&self, foods: &[Food]) -> Result<()>;

    fn clear_draft(&self) -> Result<()>;
}

/// Validate a goal entered by the user, rounding to whole kcal.
pub fn validate_goal(goal: f64) -> Result<f64> {
    if !goal.is_finite() || goal <= 0.0 {
        return Err(FoodTrackError::InvalidGoal(goal.to_string()));
    }
    let rounded = goal.round();
    if rounded <= 0.0 {
        return Err(FoodTrackError::InvalidGoal(goal.to_string()));
    }
    Ok(rounded)
}

/// Parse a goal typed by the user. Accepts `,` as decimal separator.
pub fn parse_goal(input: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| FoodTrackError::InvalidGoal(input.trim().to_string()))?;
    validate_goal(value)
}

/// Stores backed by pretty-printed JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Read and parse `file`, `None` when it does not exist.
    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        let path = self.path(file);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no stored data yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path(file), json)?;
        Ok(())
    }
}

impl MealStore for JsonStore {
    fn load_meals(&self) -> Result<Vec<Meal>> {
        let meals: Vec<Meal> = self.read_json(MEALS_FILE)?.unwrap_or_default();
        tracing::debug!(count = meals.len(), "loaded meals");
        Ok(meals)
    }

    fn save_meals(&self, meals: &[Meal]) -> Result<()> {
        self.write_json(MEALS_FILE, meals)?;
        tracing::info!(count = meals.len(), "saved meals");
        Ok(())
    }
}

impl GoalStore for JsonStore {
    fn load_goal(&self) -> f64 {
        match self.read_json::<f64>(GOAL_FILE) {
            Ok(Some(goal)) if goal.is_finite() && goal > 0.0 => goal,
            Ok(None) => DEFAULT_CALORIE_GOAL,
            Ok(Some(goal)) => {
                tracing::warn!(goal, "stored calorie goal is not positive, using default");
                DEFAULT_CALORIE_GOAL
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read calorie goal, using default");
                DEFAULT_CALORIE_GOAL
            }
        }
    }

    fn save_goal(&self, goal: f64) -> Result<f64> {
        let goal = validate_goal(goal)?;
        self.write_json(GOAL_FILE, &goal)?;
        tracing::info!(goal, "saved calorie goal");
        Ok(goal)
    }
}

impl DraftStore for JsonStore {
    fn load_draft(&self) -> Result<Vec<Food>> {
        Ok(self.read_json(DRAFT_FILE)?.unwrap_or_default())
    }

    fn save_draft(&self, foods: &[Food]) -> Result<()> {
        self.write_json(DRAFT_FILE, foods)
    }

    fn clear_draft(&self) -> Result<()> {
        match fs::remove_file(self.path(DRAFT_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_meal() -> Meal {
        Meal::new(
            "1760781600000",
            "Lunch",
            "2026-10-18",
            vec![Food::new("42", "Apple")
                .with_reference(52.0, 0.3, 14.0, 0.2)
                .with_quantity(150.0)],
        )
    }

    #[test]
    fn test_meals_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        assert!(store.load_meals().unwrap().is_empty());
    }

    #[test]
    fn test_meals_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("nested"));

        store.save_meals(&[sample_meal()]).unwrap();
        let reloaded = store.load_meals().unwrap();

        assert_eq!(reloaded, vec![sample_meal()]);
    }

    #[test]
    fn test_corrupted_meals_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MEALS_FILE), "not json").unwrap();

        let store = JsonStore::new(dir.path());
        assert!(matches!(store.load_meals(), Err(FoodTrackError::Json(_))));
    }

    #[test]
    fn test_malformed_nutrient_does_not_break_meals() {
        let dir = TempDir::new().unwrap();
        let json = r#"[{"id": "1", "name": "Lunch", "date": "2026-10-18", "foods": [
            {"id": "a", "name": "Apple", "calories": "n/a", "proteins": 0.3, "quantity": 150},
            {"id": "b", "name": "Bread", "calories": 265, "carbs": "49"}
        ]}]"#;
        fs::write(dir.path().join(MEALS_FILE), json).unwrap();

        let meals = JsonStore::new(dir.path()).load_meals().unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].foods[0].calories, None);
        assert_eq!(meals[0].foods[1].carbs, Some(49.0));
    }

    #[test]
    fn test_parse_goal() {
        assert_eq!(parse_goal("1800").unwrap(), 1800.0);
        assert_eq!(parse_goal(" 1850,6 ").unwrap(), 1851.0);
        assert!(matches!(parse_goal("lots"), Err(FoodTrackError::InvalidGoal(_))));
        assert!(parse_goal("0").is_err());
        assert!(parse_goal("-2000").is_err());
        assert!(parse_goal("").is_err());
    }

    #[test]
    fn test_goal_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        assert_eq!(store.load_goal(), DEFAULT_CALORIE_GOAL);

        fs::write(dir.path().join(GOAL_FILE), "\"abc\"").unwrap();
        assert_eq!(store.load_goal(), DEFAULT_CALORIE_GOAL);

        fs::write(dir.path().join(GOAL_FILE), "-300").unwrap();
        assert_eq!(store.load_goal(), DEFAULT_CALORIE_GOAL);

        fs::write(dir.path().join(GOAL_FILE), "0").unwrap();
        assert_eq!(store.load_goal(), DEFAULT_CALORIE_GOAL);
    }

    #[test]
    fn test_goal_save_rounds() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());

        assert_eq!(store.save_goal(1850.6).unwrap(), 1851.0);
        assert_eq!(store.load_goal(), 1851.0);
    }

    #[test]
    fn test_goal_save_rejects_non_positive() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());

        assert!(store.save_goal(0.0).is_err());
        assert!(store.save_goal(-5.0).is_err());
        assert!(store.save_goal(f64::NAN).is_err());
        assert!(store.save_goal(0.2).is_err());
        assert_eq!(store.load_goal(), DEFAULT_CALORIE_GOAL);
    }

    #[test]
    fn test_draft_lifecycle() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());

        assert!(store.load_draft().unwrap().is_empty());

        let foods = sample_meal().foods;
        store.save_draft(&foods).unwrap();
        assert_eq!(store.load_draft().unwrap(), foods);

        store.clear_draft().unwrap();
        assert!(store.load_draft().unwrap().is_empty());

        // Clearing twice is fine
        store.clear_draft().unwrap();
    }
}
