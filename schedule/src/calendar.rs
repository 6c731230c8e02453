//! Calendar rules: which afternoon slots a date offers and how dates are
//! parsed and labelled.
//!
//! Dates are plain calendar dates (`NaiveDate`). The `<input type="date">`
//! value is parsed here and nowhere else; anything that fails to parse is
//! rejected so the weekend rule only ever sees a real date.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::ScheduleError;
use crate::slot::{AFTERNOON_SLOTS_FULL, TimeSlot};

#[cfg(test)]
#[path = "calendar_test.rs"]
mod calendar_test;

/// Weekend afternoons stop before this hour.
pub const WEEKEND_CUTOFF_HOUR: u8 = 18;

/// Format of the date input's value.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Afternoon slots offered on `date`.
///
/// Saturdays and Sundays drop every slot at or after
/// [`WEEKEND_CUTOFF_HOUR`]; other days return the full list.
#[must_use]
pub fn afternoon_slots_for_date(date: NaiveDate) -> Vec<TimeSlot> {
    if is_weekend(date) {
        AFTERNOON_SLOTS_FULL
            .into_iter()
            .filter(|slot| slot.hour() < WEEKEND_CUTOFF_HOUR)
            .collect()
    } else {
        AFTERNOON_SLOTS_FULL.to_vec()
    }
}

/// Parse a `YYYY-MM-DD` date input value.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDate`] for empty or malformed input and
/// for dates that do not exist (e.g. `2024-02-30`).
pub fn parse_date_input(raw: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| ScheduleError::InvalidDate { input: raw.to_owned() })
}

/// Render `date` as a date input value.
#[must_use]
pub fn format_date_input(date: NaiveDate) -> String {
    date.format(DATE_INPUT_FORMAT).to_string()
}

/// Preview heading for `date`, e.g. `6.2 Sun`.
#[must_use]
pub fn preview_date_label(date: NaiveDate) -> String {
    let day_name = DAY_NAMES[date.weekday().num_days_from_sunday() as usize];
    format!("{}.{} {day_name}", date.month(), date.day())
}
