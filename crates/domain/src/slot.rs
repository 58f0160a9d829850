use crate::date::CalendarDate;
use crate::timespan::TimeSpan;
use chrono::{prelude::*, Duration};
use chrono_tz::Tz;

/// Number of periods in one school day.
pub const PERIODS_PER_DAY: u32 = 7;

/// Catch-all bucket for anything outside the six fixed morning/afternoon
/// periods ("after school").
pub const AFTER_SCHOOL_PERIOD: u32 = 7;

// period 1..=7 -> local start hour; period 5 starts after the lunch gap
const PERIOD_START_HOURS: [u32; PERIODS_PER_DAY as usize] = [8, 9, 10, 11, 13, 14, 15];

pub fn period_start_hour(period: u32) -> Option<u32> {
    if (1..=PERIODS_PER_DAY).contains(&period) {
        Some(PERIOD_START_HOURS[(period - 1) as usize])
    } else {
        None
    }
}

fn monday_of_week(anchor: &CalendarDate) -> NaiveDate {
    let date = anchor.to_naive();
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn local_timestamp(date: NaiveDate, hour: u32, tz: &Tz) -> anyhow::Result<i64> {
    tz.with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
        .single()
        .map(|datetime| datetime.timestamp_millis())
        .ok_or_else(|| anyhow::anyhow!("No unambiguous local time for {} {}:00 in {}", date, hour, tz))
}

/// Concrete start/end instants of a weekly-grid cell.
///
/// The cell is addressed by the week containing `anchor`, a Monday-first
/// `weekday_offset` (0..=6) and a period number (1..=7). The instants are
/// built from the period's wall-clock hours in `tz`, so re-reading a
/// stored start in the same zone reproduces the hour that was written.
pub fn period_span(
    anchor: &CalendarDate,
    weekday_offset: u32,
    period: u32,
    tz: &Tz,
) -> anyhow::Result<TimeSpan> {
    if weekday_offset > 6 {
        return Err(anyhow::anyhow!("Invalid weekday offset: {}", weekday_offset));
    }
    let start_hour = period_start_hour(period)
        .ok_or_else(|| anyhow::anyhow!("Invalid period: {}", period))?;

    let date = monday_of_week(anchor) + Duration::days(weekday_offset as i64);
    let start = local_timestamp(date, start_hour, tz)?;
    let end = local_timestamp(date, start_hour + 1, tz)?;
    Ok(TimeSpan::new(start, end))
}

/// Period of a stored instant, by local start hour.
///
/// Lossy on purpose: any hour that is not one of the six fixed period
/// start hours falls into the after-school bucket, so an entry stored at
/// 16:00 and one stored at 20:00 are indistinguishable after mapping
/// back. Round-trips are only guaranteed for periods 1 through 6.
pub fn period_of_timestamp(ts: i64, tz: &Tz) -> u32 {
    let hour = match Utc.timestamp_millis_opt(ts).single() {
        Some(datetime) => datetime.with_timezone(tz).hour(),
        None => return AFTER_SCHOOL_PERIOD,
    };
    match hour {
        8 => 1,
        9 => 2,
        10 => 3,
        11 => 4,
        13 => 5,
        14 => 6,
        _ => AFTER_SCHOOL_PERIOD,
    }
}

/// One column of the weekly schedule grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    pub date: CalendarDate,
    pub weekday: Weekday,
    pub is_weekend: bool,
}

impl WeekDay {
    /// Lookup key used by the grid view, e.g. "1/15"
    pub fn key(&self) -> String {
        format!("{}/{}", self.date.month, self.date.day)
    }
}

/// The seven days of the week containing `anchor`, Monday first.
pub fn build_week(anchor: &CalendarDate) -> Vec<WeekDay> {
    let monday = monday_of_week(anchor);
    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let weekday = date.weekday();
            WeekDay {
                date: CalendarDate {
                    year: date.year(),
                    month: date.month(),
                    day: date.day(),
                },
                weekday,
                is_weekend: weekday == Weekday::Sat || weekday == Weekday::Sun,
            }
        })
        .collect()
}
