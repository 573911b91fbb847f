//! Timestamp formatting and parsing.
//!
//! Stored timestamps are fixed-width ISO 8601 with a UTC offset
//! (`2026-02-14T08:00:00-05:00`) so that string order matches chronological
//! order for entries logged in the same offset. Range queries depend on this.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::fmt::Display;

/// `strftime` pattern for every timestamp written by Haven.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Offset-less layouts accepted on read; interpreted as already local.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time in storage format.
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Re-emit an RFC 3339 timestamp in storage format, keeping its own offset.
/// Fractional seconds are dropped. `None` if it does not parse.
pub fn normalize_timestamp(timestamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(timestamp.trim())
        .ok()
        .map(|dt| format_timestamp(&dt))
}

/// Calendar date of `timestamp` as seen in `tz`.
///
/// Timestamps with an offset are converted into `tz`; offset-less ones are
/// taken at face value. Returns `None` when nothing parses.
pub fn local_date<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(tz).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(tz).date_naive());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(timestamp, fmt) {
            return Some(ndt.date());
        }
    }
    NaiveDate::parse_from_str(timestamp.get(..10)?, "%Y-%m-%d").ok()
}

/// Inclusive `[start, end]` storage-format bounds covering `date` in `tz`,
/// suitable for `BETWEEN`. `None` if midnight does not exist in `tz` that day.
pub fn day_bounds<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<(String, String)>
where
    Tz::Offset: Display,
{
    let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
    let start = tz.from_local_datetime(&date.and_time(midnight)).earliest()?;
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)?;
    let end = tz.from_local_datetime(&date.and_time(last_second)).latest()?;
    Some((format_timestamp(&start), format_timestamp(&end)))
}
