//! Schedule provisioning
//!
//! Materializes `night` and `time_slot` rows for the currently offerable
//! nights. Everything here is idempotent: provisioning runs at startup, on a
//! periodic background task, and on demand when a submission arrives for a
//! night that has no rows yet.

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;
use sqlx::SqlitePool;

use shared::models::{Night, NightDay};

use crate::db::repository::night;
use crate::utils::{AppError, AppResult};

use super::nights::current_nights;
use super::roster::SlotRoster;

/// Per-slot order capacity (one pizza per pickup slot in this club).
pub const SLOT_MAX_ORDERS: i64 = 1;

/// Ensure a night row plus its roster slots exist for `date`.
///
/// Fails with a validation error when `date` is not a Friday or
/// Saturday, the only days the club runs.
pub async fn ensure_night_with_slots(
    pool: &SqlitePool,
    roster: &SlotRoster,
    date: NaiveDate,
) -> AppResult<Night> {
    let day = match date.weekday() {
        chrono::Weekday::Fri => NightDay::Friday,
        chrono::Weekday::Sat => NightDay::Saturday,
        other => {
            return Err(AppError::validation(format!(
                "{date} is a {other}; club nights are Friday and Saturday only"
            )));
        }
    };

    let date_str = date.format("%Y-%m-%d").to_string();
    let night = night::ensure_night(pool, &date_str, day).await?;
    night::ensure_slots(pool, night.id, &roster.time_strings(), SLOT_MAX_ORDERS).await?;
    Ok(night)
}

/// Provision rows for every currently offerable night. Returns how many
/// nights were touched.
pub async fn ensure_current_nights(
    pool: &SqlitePool,
    roster: &SlotRoster,
    now: DateTime<Tz>,
) -> AppResult<usize> {
    let candidates = current_nights(now, roster.last_start());
    for candidate in &candidates {
        ensure_night_with_slots(pool, roster, candidate.date).await?;
        tracing::debug!(date = %candidate.date, day = %candidate.day, "Night provisioned");
    }
    Ok(candidates.len())
}
