//! Date and timestamp generators.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rand::Rng;

/// Generate a random date between `start` and `end` (inclusive).
///
/// Returns `start` when the range is empty or inverted.
pub fn generate_date_between<R: Rng>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return start;
    }
    start + chrono::Duration::days(rng.gen_range(0..=span))
}

/// Generate a date within the last `years` years, up to `today`.
pub fn generate_date_in_past_years<R: Rng>(rng: &mut R, today: NaiveDate, years: u32) -> NaiveDate {
    let start = today
        .checked_sub_months(Months::new(years * 12))
        .unwrap_or(today);
    generate_date_between(rng, start, today)
}

/// Generate a date from `today` up to `years` years ahead.
pub fn generate_date_in_next_years<R: Rng>(rng: &mut R, today: NaiveDate, years: u32) -> NaiveDate {
    let end = today
        .checked_add_months(Months::new(years * 12))
        .unwrap_or(today);
    generate_date_between(rng, today, end)
}

/// Generate a timestamp between January 1st of `now`'s year and `now`.
pub fn generate_datetime_this_year<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    let year_start = NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(now);

    let start_ts = year_start.timestamp();
    let end_ts = now.timestamp();
    if start_ts >= end_ts {
        return year_start;
    }

    let random_ts = rng.gen_range(start_ts..=end_ts);
    DateTime::from_timestamp(random_ts, 0).unwrap_or(year_start)
}
