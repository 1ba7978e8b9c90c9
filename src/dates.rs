use chrono::{Days, Local, NaiveDate};

use crate::error::{FoodTrackError, Result};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// ISO `YYYY-MM-DD` key used to partition meals by day.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|_| FoodTrackError::InvalidDate(key.to_string()))
}

/// Local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Move `days` forward (or backward when negative), saturating at the calendar bounds.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.unwrap_or(date)
}

/// "Today", "Yesterday", or e.g. "Monday 12 October".
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if date == shift_days(today, -1) {
        return "Yesterday".to_string();
    }
    date.format("%A %-d %B").to_string()
}

/// Resolve an optional `--date` argument, defaulting to today.
pub fn resolve_date(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(key) => parse_date_key(key),
        None => Ok(today()),
    }
}
