use clap::{Parser, Subcommand};

/// FoodTrack: log meals and follow calories and macros against a daily goal.
#[derive(Parser, Debug)]
#[command(name = "food_track")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding meals, goal and current meal JSON files.
    #[arg(short, long, default_value = "food_track_data")]
    pub data_dir: String,

    /// Log progress to stderr (RUST_LOG overrides).
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a day's meals and totals against the goal.
    Day {
        /// Day to show (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the foods of one logged meal.
    Meal {
        /// Meal id.
        id: String,
    },

    /// Search foods by name and add one to the current meal.
    Search {
        /// Free-text query.
        query: String,
    },

    /// Look up a barcode and add the product to the current meal.
    Scan {
        /// EAN/UPC barcode.
        barcode: String,
    },

    /// Show the current meal.
    Draft,

    /// Change the serving of a food in the current meal.
    Quantity {
        /// Food id in the current meal.
        food_id: String,

        /// New serving in grams.
        grams: String,
    },

    /// Remove a food from the current meal.
    Remove {
        /// Food id in the current meal.
        food_id: String,
    },

    /// Log the current meal.
    Log {
        /// Breakfast, lunch, dinner or snack; asked when omitted.
        kind: Option<String>,

        /// Day of the meal (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a logged meal.
    Delete {
        /// Meal id.
        id: String,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or set the daily calorie goal.
    Goal {
        /// New goal in kcal; asked interactively when omitted.
        value: Option<String>,
    },

    /// Export per-day totals to CSV.
    Export {
        /// Output CSV file.
        #[arg(default_value = "daily_totals.csv")]
        path: String,

        /// First day to include (YYYY-MM-DD).
        #[arg(long)]
        from: Option<String>,

        /// Last day to include (YYYY-MM-DD).
        #[arg(long)]
        to: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Day { date: None }
    }
}
