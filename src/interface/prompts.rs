use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{FoodTrackError, Result};
use crate::interface::render::{format_totals, search_result_label};
use crate::models::{Food, MealKind};
use crate::nutrition::preview_serving;
use crate::state::{parse_goal, parse_quantity};

/// Minimum similarity for a typed meal type to count as a match.
const MEAL_KIND_MATCH_THRESHOLD: f64 = 0.8;

/// Resolve a typed meal type, tolerating typos ("lnuch", "diner").
pub fn match_meal_kind(input: &str) -> Option<MealKind> {
    if let Ok(kind) = input.parse::<MealKind>() {
        return Some(kind);
    }

    let needle = input.trim().to_lowercase();
    MealKind::ALL
        .into_iter()
        .map(|kind| (kind, jaro_winkler(&kind.label().to_lowercase(), &needle)))
        .filter(|(_, score)| *score >= MEAL_KIND_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(kind, _)| kind)
}

/// Meal type from an argument if given, otherwise from a selection list.
pub fn prompt_meal_kind(arg: Option<&str>) -> Result<MealKind> {
    if let Some(input) = arg {
        return match_meal_kind(input).ok_or_else(|| FoodTrackError::UnknownMealKind(input.to_string()));
    }

    let labels: Vec<&str> = MealKind::ALL.iter().map(|k| k.label()).collect();
    let selection = Select::new()
        .with_prompt("Meal type")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(MealKind::ALL[selection])
}

/// Ask for a serving in grams until the input is valid.
///
/// Defaults to the food's current serving, or 100g.
pub fn prompt_quantity(food: &Food) -> Result<f64> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("Quantity of '{}' (g)", food.name))
            .default(food.display_quantity().to_string())
            .interact_text()?;

        match parse_quantity(&input) {
            Ok(quantity) => {
                println!(
                    "  {} g -> {}",
                    quantity,
                    format_totals(&preview_serving(food, quantity))
                );
                return Ok(quantity);
            }
            Err(e) => println!("{}", e),
        }
    }
}

/// Let the user pick one lookup result. `None` when they pick none.
pub fn prompt_pick_food(results: &[Food]) -> Result<Option<usize>> {
    let mut options: Vec<String> = results.iter().map(search_result_label).collect();
    options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which food?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok((selection < results.len()).then_some(selection))
}

/// Ask for a new daily calorie goal.
pub fn prompt_goal(current: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("Daily calorie goal (kcal)")
        .default(format!("{:.0}", current))
        .interact_text()?;

    parse_goal(&input)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_meal_kind_exact() {
        assert_eq!(match_meal_kind("Lunch"), Some(MealKind::Lunch));
        assert_eq!(match_meal_kind("dîner"), Some(MealKind::Dinner));
    }

    #[test]
    fn test_match_meal_kind_typos() {
        assert_eq!(match_meal_kind("lnuch"), Some(MealKind::Lunch));
        assert_eq!(match_meal_kind("breakfst"), Some(MealKind::Breakfast));
        assert_eq!(match_meal_kind("snak"), Some(MealKind::Snack));
    }

    #[test]
    fn test_match_meal_kind_rejects_unrelated() {
        assert_eq!(match_meal_kind("xyz"), None);
        assert_eq!(match_meal_kind(""), None);
    }
}
