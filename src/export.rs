use std::path::Path;

use crate::error::Result;
use crate::nutrition::DaySummary;

/// Write one row per day summary to a CSV file.
pub fn write_daily_csv<P: AsRef<Path>>(path: P, days: &[DaySummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "date", "meals", "calories", "proteins", "carbs", "fats", "goal", "progress",
    ])?;

    for day in days {
        wtr.write_record([
            day.date.clone(),
            day.meal_count.to_string(),
            format!("{:.0}", day.totals.calories),
            format!("{:.1}", day.totals.proteins),
            format!("{:.1}", day.totals.carbs),
            format!("{:.1}", day.totals.fats),
            format!("{:.0}", day.goal),
            format!("{:.3}", day.progress),
        ])?;
    }

    wtr.flush()?;
    tracing::info!(days = days.len(), "exported daily totals");
    Ok(())
}
