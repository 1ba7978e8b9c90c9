use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoodTrackError {
    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Food not found in current meal: {0}")]
    FoodNotFound(String),

    #[error("Food already added to current meal: {0}")]
    DuplicateFood(String),

    #[error("A {kind} is already logged on {date}")]
    DuplicateMeal { kind: String, date: String },

    #[error("Add at least one food before logging a meal")]
    EmptyMeal,

    #[error("Invalid quantity: {0} (expected grams > 0)")]
    InvalidQuantity(String),

    #[error("Invalid calorie goal: {0} (expected kcal > 0)")]
    InvalidGoal(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown meal type: {0}")]
    UnknownMealKind(String),

    #[error("Food lookup failed: {0}")]
    Lookup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, FoodTrackError>;
