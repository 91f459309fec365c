//! Calendar helpers for the `YYYYMMDD` boundary format.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::RecurrenceError;

/// Canonical storage and wire format for task dates.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Format accepted by the task search box (`DD.MM.YYYY`).
pub const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses an 8-digit `YYYYMMDD` string into a calendar date.
///
/// chrono alone accepts variable-width years, so the shape is checked first.
pub fn parse_date(value: &str) -> Result<NaiveDate, RecurrenceError> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecurrenceError::date(value));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| RecurrenceError::date(value))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a search term written as `DD.MM.YYYY`, returning `None` for anything else.
pub fn parse_search_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), SEARCH_DATE_FORMAT).ok()
}

/// Number of days in the given month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Adds whole years, falling back to Feb 28 when Feb 29 does not exist in the target year.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(years.checked_mul(12)?))
}
