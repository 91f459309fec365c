use crate::error::CoreError;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Validate an IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone).map_err(|_| {
        CoreError::InvalidTimezone(format!(
            "'{}'. Use IANA timezone names like 'Europe/Moscow'",
            timezone
        ))
    })
}

/// The current calendar day as seen in `tz`.
pub fn today_in(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}
