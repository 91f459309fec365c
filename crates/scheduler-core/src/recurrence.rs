use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::dates::{add_years, days_in_month, format_date, parse_date};
use crate::error::RecurrenceError;

/// Upper bound for the `d <n>` interval.
pub const MAX_DAY_INTERVAL: u32 = 400;

/// The degenerate rule that an overdue task collapses to "today" instead of stepping.
pub const DAILY_RULE: &str = "d 1";

/// Month-day search horizon. Nine years always contains a Feb 29, even across 2100.
const MONTH_SCAN_HORIZON: usize = 12 * 9 + 1;

/// A parsed, validated repeat rule.
///
/// Grammar (first token is the tag):
/// - `y`                    every year on the same month/day
/// - `d <n>`                every `n` days, `1 <= n <= 400`
/// - `w <1-7,...>`          on the listed ISO weekdays (1 = Monday)
/// - `m <days> [<months>]`  on the listed days of month (`-1` last, `-2` second to last),
///                          optionally restricted to the listed months
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceRule {
    Yearly,
    EveryNDays(u32),
    WeekdaySet(BTreeSet<u32>),
    MonthDaySet {
        days: BTreeSet<i32>,
        months: BTreeSet<u32>,
    },
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        let mut tokens = rule.split_whitespace();
        let tag = tokens
            .next()
            .ok_or_else(|| RecurrenceError::rule(rule, "rule is empty"))?;
        let args: Vec<&str> = tokens.collect();

        match tag {
            "y" => {
                if !args.is_empty() {
                    return Err(RecurrenceError::rule(rule, "'y' takes no arguments"));
                }
                Ok(RecurrenceRule::Yearly)
            }
            "d" => {
                let [interval] = args.as_slice() else {
                    return Err(RecurrenceError::rule(rule, "expected 'd <days>'"));
                };
                let interval: u32 = interval.parse().map_err(|_| {
                    RecurrenceError::rule(rule, format!("'{}' is not a number of days", interval))
                })?;
                if !(1..=MAX_DAY_INTERVAL).contains(&interval) {
                    return Err(RecurrenceError::rule(
                        rule,
                        format!("interval must be between 1 and {}", MAX_DAY_INTERVAL),
                    ));
                }
                Ok(RecurrenceRule::EveryNDays(interval))
            }
            "w" => {
                let [list] = args.as_slice() else {
                    return Err(RecurrenceError::rule(rule, "expected 'w <weekdays>'"));
                };
                let days = parse_list(rule, list, "weekday", |d: &u32| (1..=7).contains(d))?;
                Ok(RecurrenceRule::WeekdaySet(days))
            }
            "m" => {
                let (day_list, month_list) = match args.as_slice() {
                    [days] => (*days, None),
                    [days, months] => (*days, Some(*months)),
                    _ => {
                        return Err(RecurrenceError::rule(
                            rule,
                            "expected 'm <days> [<months>]'",
                        ))
                    }
                };
                let days = parse_list(rule, day_list, "day of month", |d: &i32| {
                    *d != 0 && (-2..=31).contains(d)
                })?;
                let months = match month_list {
                    Some(list) => parse_list(rule, list, "month", |m: &u32| (1..=12).contains(m))?,
                    None => BTreeSet::new(),
                };
                if !month_days_reachable(&days, &months) {
                    return Err(RecurrenceError::rule(
                        rule,
                        "none of the listed days exist in the listed months",
                    ));
                }
                Ok(RecurrenceRule::MonthDaySet { days, months })
            }
            other => Err(RecurrenceError::rule(
                rule,
                format!("unknown rule type '{}'", other),
            )),
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: ToString>(values: &BTreeSet<T>) -> String {
            values.iter().map(T::to_string).collect::<Vec<_>>().join(",")
        }

        match self {
            RecurrenceRule::Yearly => write!(f, "y"),
            RecurrenceRule::EveryNDays(n) => write!(f, "d {}", n),
            RecurrenceRule::WeekdaySet(days) => write!(f, "w {}", join(days)),
            RecurrenceRule::MonthDaySet { days, months } if months.is_empty() => {
                write!(f, "m {}", join(days))
            }
            RecurrenceRule::MonthDaySet { days, months } => {
                write!(f, "m {} {}", join(days), join(months))
            }
        }
    }
}

impl RecurrenceRule {
    /// Finds the first occurrence of this rule that is strictly after `today`.
    ///
    /// # Arguments
    /// * `today` - Reference day; the result is always later than it
    /// * `date` - The task's current date, the anchor for stepping
    ///
    /// # Returns
    /// * `Result<NaiveDate, RecurrenceError>` - The next occurrence
    ///
    /// # Behavior
    /// - `Yearly` and `EveryNDays` always step at least once from `date`, jumping
    ///   over the gap to `today` arithmetically
    /// - `WeekdaySet` and `MonthDaySet` pick the first matching day after both
    ///   `date` and `today`
    /// - Fails only when the occurrence would leave chrono's calendar range
    pub fn next_after(&self, today: NaiveDate, date: NaiveDate) -> Result<NaiveDate, RecurrenceError> {
        let next = match self {
            RecurrenceRule::Yearly => next_yearly(today, date),
            RecurrenceRule::EveryNDays(interval) => next_every_n_days(today, date, *interval),
            RecurrenceRule::WeekdaySet(days) => next_weekday(today, date, days),
            RecurrenceRule::MonthDaySet { days, months } => next_month_day(today, date, days, months),
        };
        next.ok_or_else(|| {
            RecurrenceError::rule(&self.to_string(), "no occurrence within the supported date range")
        })
    }
}

/// Computes the next date for a task, in boundary (`YYYYMMDD`) form.
///
/// # Arguments
/// * `today` - Reference day
/// * `date` - Task date as `YYYYMMDD`
/// * `rule` - Repeat rule string, must be non-empty
///
/// # Returns
/// * `Result<String, RecurrenceError>` - Next date strictly after `today`
pub fn next_date(today: NaiveDate, date: &str, rule: &str) -> Result<String, RecurrenceError> {
    let date = parse_date(date)?;
    let rule: RecurrenceRule = rule.parse()?;
    rule.next_after(today, date).map(format_date)
}

/// Normalizes the date of a task being created or edited.
///
/// # Behavior
/// - A missing or empty date means today
/// - A date that is not after `today` rolls forward: with no rule or the
///   `d 1` rule it becomes today, otherwise the rule decides
/// - A future date is kept as is, but a non-empty rule is still validated
pub fn advance_task_date(
    today: NaiveDate,
    date: Option<&str>,
    repeat: &str,
) -> Result<String, RecurrenceError> {
    let date = match date {
        Some(value) if !value.is_empty() => parse_date(value)?,
        _ => today,
    };

    if date > today {
        if !repeat.is_empty() {
            repeat.parse::<RecurrenceRule>()?;
        }
        return Ok(format_date(date));
    }

    if repeat.is_empty() || repeat == DAILY_RULE {
        return Ok(format_date(today));
    }

    let rule: RecurrenceRule = repeat.parse()?;
    rule.next_after(today, date).map(format_date)
}

fn parse_list<T>(
    rule: &str,
    list: &str,
    what: &str,
    valid: impl Fn(&T) -> bool,
) -> Result<BTreeSet<T>, RecurrenceError>
where
    T: FromStr + Ord,
{
    list.split(',')
        .map(|item| {
            let value: T = item
                .parse()
                .map_err(|_| RecurrenceError::rule(rule, format!("'{}' is not a valid {}", item, what)))?;
            if valid(&value) {
                Ok(value)
            } else {
                Err(RecurrenceError::rule(rule, format!("{} '{}' is out of range", what, item)))
            }
        })
        .collect()
}

/// Resolves a rule day against a month of `len` days. Positive days past the end do not exist.
fn resolve_day(day: i32, len: u32) -> Option<u32> {
    if day > 0 {
        let day = day.unsigned_abs();
        (day <= len).then_some(day)
    } else {
        len.checked_sub(day.unsigned_abs() - 1)
    }
}

fn month_days_reachable(days: &BTreeSet<i32>, months: &BTreeSet<u32>) -> bool {
    let candidates: Vec<u32> = if months.is_empty() {
        (1..=12).collect()
    } else {
        months.iter().copied().collect()
    };
    // 2000 is a leap year, so February is at its longest.
    candidates.iter().any(|&month| {
        let len = days_in_month(2000, month);
        days.iter().any(|&day| resolve_day(day, len).is_some())
    })
}

fn next_yearly(today: NaiveDate, date: NaiveDate) -> Option<NaiveDate> {
    let mut years = u32::try_from(today.year() - date.year()).unwrap_or(0).max(1);
    loop {
        let candidate = add_years(date, years)?;
        if candidate > today {
            return Some(candidate);
        }
        years = years.checked_add(1)?;
    }
}

fn next_every_n_days(today: NaiveDate, date: NaiveDate, interval: u32) -> Option<NaiveDate> {
    let interval = u64::from(interval);
    let steps = if date > today {
        1
    } else {
        let gap = u64::try_from((today - date).num_days()).ok()?;
        gap / interval + 1
    };
    date.checked_add_days(Days::new(steps.checked_mul(interval)?))
}

fn next_weekday(today: NaiveDate, date: NaiveDate, days: &BTreeSet<u32>) -> Option<NaiveDate> {
    let mut candidate = date.max(today);
    for _ in 0..7 {
        candidate = candidate.succ_opt()?;
        if days.contains(&candidate.weekday().number_from_monday()) {
            return Some(candidate);
        }
    }
    None
}

fn next_month_day(
    today: NaiveDate,
    date: NaiveDate,
    days: &BTreeSet<i32>,
    months: &BTreeSet<u32>,
) -> Option<NaiveDate> {
    let threshold = date.max(today);
    let (mut year, mut month) = (threshold.year(), threshold.month());

    for _ in 0..MONTH_SCAN_HORIZON {
        if months.is_empty() || months.contains(&month) {
            let len = days_in_month(year, month);
            let next = days
                .iter()
                .filter_map(|&day| resolve_day(day, len))
                .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
                .filter(|candidate| *candidate > threshold)
                .min();
            if next.is_some() {
                return next;
            }
        }

        if month == 12 {
            year = year.checked_add(1)?;
            month = 1;
        } else {
            month += 1;
        }
    }
    None
}
