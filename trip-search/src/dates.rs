//! Travel date expressions.
//!
//! An expression is a comma-separated list of `today`, `tomorrow`,
//! `YYYY-MM-DD`, `DD.MM.YYYY` or `DD.MM`.

use chrono::{Datelike, Days, NaiveDate};

/// A `DD.MM` date further than this in the past is taken to mean next year.
const PAST_GRACE_DAYS: u64 = 2;

/// Error parsing a date expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("empty date expression")]
    Empty,

    #[error("unrecognised date: {0:?} (expected today, tomorrow, YYYY-MM-DD, DD.MM.YYYY or DD.MM)")]
    Unrecognised(String),
}

/// Parse a date expression relative to `today`.
///
/// Order is preserved and duplicates are dropped. One bad item fails the
/// whole expression.
pub fn parse_dates(expr: &str, today: NaiveDate) -> Result<Vec<NaiveDate>, DateError> {
    let mut dates = Vec::new();

    for item in expr.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let date = parse_one(item, today)?;
        if !dates.contains(&date) {
            dates.push(date);
        }
    }

    if dates.is_empty() {
        return Err(DateError::Empty);
    }
    Ok(dates)
}

fn parse_one(item: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    let unrecognised = || DateError::Unrecognised(item.to_string());

    match item.to_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return today.checked_add_days(Days::new(1)).ok_or_else(unrecognised),
        _ => {}
    }

    // chrono's %Y accepts short years, so the year field is checked separately
    let full_formats = [
        ("%Y-%m-%d", item.split('-').next()),
        ("%d.%m.%Y", item.rsplit('.').next()),
    ];
    for (format, year) in full_formats {
        if year.is_some_and(|y| y.len() == 4)
            && let Ok(date) = NaiveDate::parse_from_str(item, format)
        {
            return Ok(date);
        }
    }

    parse_day_month(item, today).ok_or_else(unrecognised)
}

/// `DD.MM` in the current year, or next year if that is well in the past.
fn parse_day_month(item: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (day, month) = item.split_once('.')?;
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;

    let cutoff = today.checked_sub_days(Days::new(PAST_GRACE_DAYS))?;
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date >= cutoff => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
    }
}
