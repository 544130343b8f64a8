//! Time helpers — business timezone conversion
//!
//! Pickup dates and slot times travel the API as strings (`YYYY-MM-DD`,
//! `HH:MM`) and are converted to concrete instants in the configured club
//! timezone here. Repositories only ever see strings and `i64` Unix millis.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a slot time string (HH:MM)
pub fn parse_slot_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// Format a slot time back to its wire form (HH:MM)
pub fn format_slot_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Date + time → Unix millis in the club timezone
///
/// DST gap fallback: if the local time does not exist (spring-forward),
/// fall back to interpreting it as UTC.
pub fn slot_instant_millis(date: NaiveDate, time: NaiveTime, tz: Tz) -> i64 {
    let naive = date.and_time(time);
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Current wall-clock time in the club timezone
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// True if the slot's full timestamp is strictly in the past relative to `now`
pub fn slot_is_past(date: NaiveDate, time: NaiveTime, now: &DateTime<Tz>) -> bool {
    slot_instant_millis(date, time, now.timezone()) < now.timestamp_millis()
}
