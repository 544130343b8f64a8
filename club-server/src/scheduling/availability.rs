//! Slot availability resolver
//!
//! Computes the bookable start times for a night: the roster minus slots
//! consumed by extant orders, minus administratively locked slots, minus
//! slots whose start has already passed.
//!
//! The resolver fails closed: if either underlying fetch errors, the error
//! propagates and no slots are reported. Treating a failed lookup as
//! "nothing taken" would invite double-booking.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::db::repository::{locked_slot, order};
use crate::utils::AppResult;
use crate::utils::time::{format_slot_time, slot_is_past};

use super::roster::SlotRoster;

/// Pure filter: offerable = roster − taken − past.
///
/// `taken` holds the union of order-consumed and locked start times in wire
/// form (`HH:MM`). Candidates keep the roster's ascending order; no two
/// candidates collide since each is a distinct instant.
pub fn filter_offerable(
    roster: &SlotRoster,
    taken: &HashSet<String>,
    night_date: NaiveDate,
    now: &DateTime<Tz>,
) -> Vec<NaiveTime> {
    roster
        .times()
        .iter()
        .copied()
        .filter(|t| !taken.contains(&format_slot_time(*t)))
        .filter(|t| !slot_is_past(night_date, *t, now))
        .collect()
}

/// Bookable start times for `night_date`, in wire form, ascending.
pub async fn available_slots(
    pool: &SqlitePool,
    roster: &SlotRoster,
    night_date: NaiveDate,
    now: &DateTime<Tz>,
) -> AppResult<Vec<String>> {
    let date = night_date.format("%Y-%m-%d").to_string();

    // Both fetches must succeed; errors propagate instead of being read as
    // an empty taken-set.
    let mut taken: HashSet<String> = order::active_slot_times_for_date(pool, &date)
        .await?
        .into_iter()
        .collect();
    taken.extend(locked_slot::times_for_date(pool, &date).await?);

    Ok(filter_offerable(roster, &taken, night_date, now)
        .into_iter()
        .map(format_slot_time)
        .collect())
}
