use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FoodTrackError;
use crate::models::Food;

/// A named, dated collection of foods eaten together.
///
/// `date` is the ISO `YYYY-MM-DD` day key; `name` is the meal type label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub foods: Vec<Food>,
}

impl Meal {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        date: impl Into<String>,
        foods: Vec<Food>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: date.into(),
            foods,
        }
    }

    /// Meal type, if the stored name is one of the known kinds.
    pub fn kind(&self) -> Option<MealKind> {
        self.name.parse().ok()
    }

    pub fn is_on(&self, date_key: &str) -> bool {
        self.date == date_key
    }
}

/// The meal types a day can hold, one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealKind {
    pub const ALL: [MealKind; 4] = [
        MealKind::Breakfast,
        MealKind::Lunch,
        MealKind::Dinner,
        MealKind::Snack,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MealKind::Breakfast => "Breakfast",
            MealKind::Lunch => "Lunch",
            MealKind::Dinner => "Dinner",
            MealKind::Snack => "Snack",
        }
    }

    /// Accepted spellings, including the labels of older French data files.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            MealKind::Breakfast => &["breakfast", "petit-déjeuner", "petit-dejeuner"],
            MealKind::Lunch => &["lunch", "déjeuner", "dejeuner"],
            MealKind::Dinner => &["dinner", "dîner", "diner"],
            MealKind::Snack => &["snack"],
        }
    }
}

impl fmt::Display for MealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealKind {
    type Err = FoodTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        MealKind::ALL
            .into_iter()
            .find(|kind| kind.aliases().contains(&needle.as_str()))
            .ok_or_else(|| FoodTrackError::UnknownMealKind(s.to_string()))
    }
}
