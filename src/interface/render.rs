use chrono::NaiveDate;

use crate::dates::day_label;
use crate::models::{Food, Meal, NutritionTotals};
use crate::nutrition::{meal_totals, scale_food, DaySummary};

/// Width of the goal progress bar in characters.
pub const PROGRESS_BAR_WIDTH: usize = 30;

/// Calories as whole kcal, macros with one decimal.
pub fn format_totals(totals: &NutritionTotals) -> String {
    format!(
        "{:.0} kcal | P {:.1}g | C {:.1}g | F {:.1}g",
        totals.calories, totals.proteins, totals.carbs, totals.fats
    )
}

/// Fixed-width bar for a ratio in [0, 1]; out-of-range input is clamped.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let filled = (ratio * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One line for a food inside a meal or draft.
pub fn format_food_line(food: &Food) -> String {
    let mut line = format!(
        "{} - {} g - {}",
        food.display_name(),
        food.display_quantity(),
        format_totals(&scale_food(food))
    );

    let missing = food.missing_nutrients();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|n| n.label()).collect();
        line.push_str(&format!("  [no data: {}]", names.join(", ")));
    }
    line
}

/// Day view: each meal with its totals, then the day against the goal.
pub fn display_day(date: NaiveDate, today: NaiveDate, meals: &[&Meal], summary: &DaySummary) {
    println!();
    println!("=== {} ({}) ===", day_label(date, today), summary.date);
    println!();

    if meals.is_empty() {
        println!("No meals logged for this day.");
    }

    for meal in meals {
        println!(
            "  {:<10} {}  (id {})",
            meal.name,
            format_totals(&meal_totals(meal)),
            meal.id
        );
    }

    println!();
    println!("Total: {}", format_totals(&summary.totals));
    println!(
        "Goal:  {} {:.0} / {:.0} kcal",
        progress_bar(summary.progress, PROGRESS_BAR_WIDTH),
        summary.totals.calories,
        summary.goal
    );
    if summary.goal_reached() {
        println!("Daily goal reached.");
    } else {
        println!("{:.0} kcal remaining.", summary.remaining_calories);
    }
    println!();
}

/// Detailed view of one meal.
pub fn display_meal(meal: &Meal) {
    println!();
    println!("=== {} - {} ===", meal.name, meal.date);
    println!();

    for food in &meal.foods {
        println!("  {}", format_food_line(food));
        if let Some(grade) = &food.nutriscore {
            println!("      Nutri-Score {}", grade.to_uppercase());
        }
    }

    println!();
    println!("Total: {}", format_totals(&meal_totals(meal)));
    println!();
}

/// Foods of the meal being composed with a running total.
pub fn display_draft(foods: &[Food], totals: &NutritionTotals) {
    if foods.is_empty() {
        println!("Current meal is empty.");
        return;
    }

    println!();
    println!("=== Current meal ({} items) ===", foods.len());
    println!();
    for food in foods {
        println!("  [{}] {}", food.id, format_food_line(food));
    }
    println!();
    println!("Total: {}", format_totals(totals));
    println!();
}

/// Label for a lookup result in a selection list (reference values).
pub fn search_result_label(food: &Food) -> String {
    format!(
        "{} - {} per 100g",
        food.display_name(),
        format_totals(&scale_food(&Food {
            quantity: None,
            ..food.clone()
        }))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_totals_rounding() {
        let totals = NutritionTotals::new(278.4, 10.46, 41.0, 8.3);
        assert_eq!(format_totals(&totals), "278 kcal | P 10.5g | C 41.0g | F 8.3g");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(1.0, 4), "[####]");
        assert_eq!(progress_bar(1.25, 4), "[####]");
        assert_eq!(progress_bar(-1.0, 4), "[----]");
    }

    #[test]
    fn test_food_line_flags_missing_data() {
        let mut food = Food::new("1", "Soup").with_quantity(250.0);
        food.calories = Some(40.0);

        let line = format_food_line(&food);
        assert!(line.starts_with("Soup - 250 g - 100 kcal"));
        assert!(line.ends_with("[no data: proteins, carbs, fats]"));
    }

    #[test]
    fn test_search_label_ignores_serving() {
        let food = Food::new("1", "Rice")
            .with_reference(130.0, 2.7, 28.0, 0.3)
            .with_quantity(250.0);
        assert!(search_result_label(&food).contains("130 kcal"));
    }
}
