mod draft;
mod journal;
mod persistence;

pub use draft::{parse_quantity, validate_quantity, MealDraft};
pub use journal::MealJournal;
pub use persistence::{parse_goal, validate_goal, DraftStore, GoalStore, JsonStore, MealStore};
