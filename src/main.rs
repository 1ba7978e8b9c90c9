use clap::Parser;
use tracing_subscriber::EnvFilter;

use food_track_rs::cli::{Cli, Command};
use food_track_rs::dates::{date_key, parse_date_key, resolve_date, today};
use food_track_rs::error::{FoodTrackError, Result};
use food_track_rs::export::write_daily_csv;
use food_track_rs::interface::{
    display_day, display_draft, display_meal, format_totals, prompt_goal, prompt_meal_kind,
    prompt_pick_food, prompt_quantity, prompt_yes_no,
};
use food_track_rs::lookup::{FoodLookup, OpenFoodFactsClient};
use food_track_rs::models::Food;
use food_track_rs::nutrition::meal_totals;
use food_track_rs::state::{
    parse_goal, parse_quantity, DraftStore, GoalStore, JsonStore, MealDraft, MealJournal,
    MealStore,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "food_track_rs=info"
    } else {
        "food_track_rs=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let store = JsonStore::new(&cli.data_dir);
    tracing::debug!(dir = %store.dir().display(), "using data directory");

    match cli.command.unwrap_or_default() {
        Command::Day { date } => cmd_day(&store, date.as_deref()),
        Command::Meal { id } => cmd_meal(&store, &id),
        Command::Search { query } => cmd_search(&store, &OpenFoodFactsClient::new(), &query),
        Command::Scan { barcode } => cmd_scan(&store, &OpenFoodFactsClient::new(), &barcode),
        Command::Draft => cmd_draft(&store),
        Command::Quantity { food_id, grams } => cmd_quantity(&store, &food_id, &grams),
        Command::Remove { food_id } => cmd_remove(&store, &food_id),
        Command::Log { kind, date } => cmd_log(&store, kind.as_deref(), date.as_deref()),
        Command::Delete { id, yes } => cmd_delete(&store, &id, yes),
        Command::Goal { value } => cmd_goal(&store, value.as_deref()),
        Command::Export { path, from, to } => {
            cmd_export(&store, &path, from.as_deref(), to.as_deref())
        }
    }
}

/// Show one day's meals and progress.
fn cmd_day(store: &JsonStore, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date)?;
    let journal = MealJournal::new(store.load_meals()?);
    let goal = store.load_goal();

    let key = date_key(date);
    let meals = journal.meals_on(&key);
    let summary = journal.summarize_day(&key, goal);

    display_day(date, today(), &meals, &summary);
    Ok(())
}

/// Show the detail of a logged meal.
fn cmd_meal(store: &JsonStore, id: &str) -> Result<()> {
    let journal = MealJournal::new(store.load_meals()?);
    let meal = journal
        .get(id)
        .ok_or_else(|| FoodTrackError::MealNotFound(id.to_string()))?;

    display_meal(meal);
    Ok(())
}

/// Search the food database and add a result to the current meal.
fn cmd_search(store: &JsonStore, lookup: &impl FoodLookup, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        println!("Enter something to search for.");
        return Ok(());
    }

    let results = lookup.search(query)?;
    if results.is_empty() {
        println!("No products found for '{}'.", query);
        return Ok(());
    }

    match prompt_pick_food(&results)? {
        Some(index) => add_to_draft(store, &results[index]),
        None => Ok(()),
    }
}

/// Look up a barcode and add the product to the current meal.
fn cmd_scan(store: &JsonStore, lookup: &impl FoodLookup, barcode: &str) -> Result<()> {
    match lookup.by_barcode(barcode)? {
        Some(food) => {
            println!("Found: {}", food.display_name());
            add_to_draft(store, &food)
        }
        None => {
            println!("Product not found for barcode {}.", barcode);
            Ok(())
        }
    }
}

fn add_to_draft(store: &JsonStore, food: &Food) -> Result<()> {
    let mut draft = MealDraft::from_foods(store.load_draft()?);
    if draft.contains(&food.id) {
        println!("'{}' is already in the current meal.", food.name);
        return Ok(());
    }

    let quantity = prompt_quantity(food)?;
    draft.add_food(food, quantity)?;
    store.save_draft(draft.foods())?;

    println!("Added. Current meal: {}", format_totals(&draft.totals()));
    Ok(())
}

/// Show the meal being composed.
fn cmd_draft(store: &JsonStore) -> Result<()> {
    let draft = MealDraft::from_foods(store.load_draft()?);
    display_draft(draft.foods(), &draft.totals());
    Ok(())
}

fn cmd_quantity(store: &JsonStore, food_id: &str, grams: &str) -> Result<()> {
    let mut draft = MealDraft::from_foods(store.load_draft()?);
    draft.set_quantity(food_id, parse_quantity(grams)?)?;
    store.save_draft(draft.foods())?;

    display_draft(draft.foods(), &draft.totals());
    Ok(())
}

fn cmd_remove(store: &JsonStore, food_id: &str) -> Result<()> {
    let mut draft = MealDraft::from_foods(store.load_draft()?);
    let removed = draft.remove_food(food_id)?;
    store.save_draft(draft.foods())?;

    println!("Removed '{}'.", removed.name);
    Ok(())
}

/// Turn the current meal into a logged meal.
fn cmd_log(store: &JsonStore, kind: Option<&str>, date: Option<&str>) -> Result<()> {
    let draft = MealDraft::from_foods(store.load_draft()?);
    if draft.is_empty() {
        return Err(FoodTrackError::EmptyMeal);
    }

    let date = resolve_date(date)?;
    let kind = prompt_meal_kind(kind)?;

    let mut journal = MealJournal::new(store.load_meals()?);
    let id = journal.log_meal(kind, date, draft.into_foods())?;
    store.save_meals(journal.meals())?;
    store.clear_draft()?;

    if let Some(meal) = journal.get(&id) {
        println!(
            "Logged {} for {} (id {}): {}",
            meal.name,
            meal.date,
            meal.id,
            format_totals(&meal_totals(meal))
        );
    }
    Ok(())
}

fn cmd_delete(store: &JsonStore, id: &str, yes: bool) -> Result<()> {
    let mut journal = MealJournal::new(store.load_meals()?);
    let meal = journal
        .get(id)
        .ok_or_else(|| FoodTrackError::MealNotFound(id.to_string()))?;

    if !yes {
        let prompt = format!("Delete {} of {}?", meal.name, meal.date);
        if !prompt_yes_no(&prompt, false)? {
            return Ok(());
        }
    }

    let removed = journal.delete(id)?;
    store.save_meals(journal.meals())?;
    println!("Deleted {} of {}.", removed.name, removed.date);
    Ok(())
}

fn cmd_goal(store: &JsonStore, value: Option<&str>) -> Result<()> {
    let current = store.load_goal();

    let goal = match value {
        Some(input) => parse_goal(input)?,
        None => {
            println!("Daily goal: {:.0} kcal", current);
            if !prompt_yes_no("Change it?", false)? {
                return Ok(());
            }
            prompt_goal(current)?
        }
    };

    let saved = store.save_goal(goal)?;
    println!("Daily goal set to {:.0} kcal.", saved);
    Ok(())
}

/// Export per-day totals, optionally limited to a date range.
fn cmd_export(store: &JsonStore, path: &str, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let from = from.map(parse_date_key).transpose()?.map(date_key);
    let to = to.map(parse_date_key).transpose()?.map(date_key);

    let journal = MealJournal::new(store.load_meals()?);
    let goal = store.load_goal();

    let days: Vec<_> = journal
        .dates()
        .into_iter()
        .filter(|d| from.as_ref().is_none_or(|f| d >= f))
        .filter(|d| to.as_ref().is_none_or(|t| d <= t))
        .map(|d| journal.summarize_day(&d, goal))
        .collect();

    write_daily_csv(path, &days)?;
    println!("Exported {} days to {}.", days.len(), path);
    Ok(())
}
