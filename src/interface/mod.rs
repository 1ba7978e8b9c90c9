pub mod prompts;
pub mod render;

pub use prompts::{
    match_meal_kind, prompt_goal, prompt_meal_kind, prompt_pick_food, prompt_quantity,
    prompt_yes_no,
};
pub use render::{
    display_day, display_draft, display_meal, format_food_line, format_totals, progress_bar,
};
