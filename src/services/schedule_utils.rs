use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

pub fn minutes_from_midnight(time: NaiveTime) -> i64 {
    (time.hour() as i64) * 60 + (time.minute() as i64)
}

/// Half-open `[start, end)` in minutes from midnight. An end that is not after the
/// start wraps past midnight and is pushed into the next day.
pub fn minute_range(start: NaiveTime, end: NaiveTime) -> (i64, i64) {
    let start_minutes = minutes_from_midnight(start);
    let mut end_minutes = minutes_from_midnight(end);
    if end_minutes <= start_minutes {
        end_minutes += MINUTES_PER_DAY;
    }
    (start_minutes, end_minutes)
}

/// Length of a clock range, adding a day when `end < start`.
pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let start_minutes = minutes_from_midnight(start);
    let mut end_minutes = minutes_from_midnight(end);
    if end_minutes < start_minutes {
        end_minutes += MINUTES_PER_DAY;
    }
    end_minutes - start_minutes
}

pub fn overlaps(a: (i64, i64), b: (i64, i64)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Clock time `minutes` after `time`, wrapping at midnight.
pub fn add_minutes(time: NaiveTime, minutes: i64) -> NaiveTime {
    let (shifted, _) = time.overflowing_add_signed(Duration::minutes(minutes));
    shifted
}

pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

pub fn is_weekday(day_of_week: u32) -> bool {
    (1..=5).contains(&day_of_week)
}

/// The seven consecutive dates starting at `week_start`.
pub fn week_dates(week_start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    week_start.iter_days().take(7)
}

pub fn hours_between(a: NaiveDateTime, b: NaiveDateTime) -> f64 {
    (a - b).num_minutes().abs() as f64 / 60.0
}
