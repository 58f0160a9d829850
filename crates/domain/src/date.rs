use chrono::prelude::*;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Invalid calendar date: {0}")]
pub struct InvalidDateError(pub String);

/// A calendar date without any time or offset component.
///
/// Due dates coming out of the store are calendar intentions ("hand it in
/// on the 15th"), not instants. They must never be round-tripped through
/// an instant-to-local-time conversion, which can shift them by a day
/// depending on the zone the instant was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, InvalidDateError> {
        if !(1970..=2100).contains(&year) || !(1..=12).contains(&month) {
            return Err(InvalidDateError(format!("{}-{}-{}", year, month, day)));
        }
        if day < 1 || day > get_month_length(year, month) {
            return Err(InvalidDateError(format!("{}-{}-{}", year, month, day)));
        }
        Ok(Self { year, month, day })
    }

    pub fn to_naive(&self) -> NaiveDate {
        // Fields are validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap()
    }

    pub fn weekday(&self) -> Weekday {
        self.to_naive().weekday()
    }
}

impl FromStr for CalendarDate {
    type Err = InvalidDateError;

    fn from_str(datestr: &str) -> Result<Self, Self::Err> {
        let dates = datestr.split('-').collect::<Vec<_>>();
        if dates.len() != 3 {
            return Err(InvalidDateError(datestr.to_string()));
        }
        let year = dates[0].parse::<i32>();
        let month = dates[1].parse::<u32>();
        let day = dates[2].parse::<u32>();

        match (year, month, day) {
            (Ok(year), Ok(month), Ok(day)) => Self::new(year, month, day),
            _ => Err(InvalidDateError(datestr.to_string())),
        }
    }
}

/// Reads the date components of a stored due date.
///
/// Only the date part of the text is looked at. A full timestamp like
/// `"2025-01-15T00:00:00+09:00"` resolves to Jan 15 no matter which
/// offset it carries.
pub fn to_calendar_date(raw: &str) -> Result<CalendarDate, InvalidDateError> {
    let date_part = raw.split(|c| c == 'T' || c == ' ').next().unwrap_or(raw);
    let date_part = date_part.get(..10).unwrap_or(date_part);
    date_part.parse()
}

/// Whole days between two calendar dates: positive when `target` is in the
/// future, zero when it is `today`, negative when it has passed.
///
/// Computed from date components, so a daylight-saving transition between
/// the two dates cannot skew the count.
pub fn days_until(target: &CalendarDate, today: &CalendarDate) -> i64 {
    target
        .to_naive()
        .signed_duration_since(today.to_naive())
        .num_days()
}

/// Calendar date of an instant in the given timezone. `None` only for
/// timestamps outside the representable calendar range.
pub fn date_of_timestamp(ts: i64, tz: &Tz) -> Option<CalendarDate> {
    let date = Utc.timestamp_millis_opt(ts).single()?.with_timezone(tz);
    Some(CalendarDate {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    })
}

/// Display string like "Jan 15 (Wed)"
pub fn format_human(date: &CalendarDate) -> String {
    date.to_naive().format("%b %-d (%a)").to_string()
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month {
        1 => 31,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 => 31,
        4 => 30,
        5 => 31,
        6 => 30,
        7 => 31,
        8 => 31,
        9 => 30,
        10 => 31,
        11 => 30,
        12 => 31,
        _ => panic!("Invalid month"),
    }
}
