use chrono::{Duration, NaiveDate, Utc};

/// Today's date in UTC.
///
/// Trade and close dates are plain calendar dates, so the comparison
/// baseline is taken from the UTC clock rather than a local zone.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// First day of a trailing window of `days` ending on `as_of`.
///
/// A 30-day window ending 2025-03-31 starts on 2025-03-01.
pub fn window_start(as_of: NaiveDate, days: i64) -> NaiveDate {
    as_of - Duration::days(days)
}

/// Whole days from `start` to `end`; negative when `end` precedes `start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
