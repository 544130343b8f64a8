//! Night and TimeSlot Repository

use super::RepoResult;
use shared::models::{Night, NightDay, TimeSlot};
use sqlx::SqlitePool;

const NIGHT_SELECT: &str = "SELECT id, date, day_of_week, is_active, created_at FROM night";
const SLOT_SELECT: &str = "SELECT id, night_id, start_time, is_available, max_orders, \
     current_orders FROM time_slot";

pub async fn find_by_date(pool: &SqlitePool, date: &str) -> RepoResult<Option<Night>> {
    let sql = format!("{} WHERE date = ?", NIGHT_SELECT);
    let row = sqlx::query_as::<_, Night>(&sql)
        .bind(date)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Idempotently materialize a night row for `date`.
///
/// Provisioning and on-demand submission both funnel through here; the
/// UNIQUE constraint on `date` makes concurrent calls safe.
pub async fn ensure_night(pool: &SqlitePool, date: &str, day: NightDay) -> RepoResult<Night> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO night (id, date, day_of_week, is_active, created_at) \
         VALUES (?1, ?2, ?3, 1, ?4) ON CONFLICT(date) DO NOTHING",
    )
    .bind(id)
    .bind(date)
    .bind(day.as_str())
    .bind(now)
    .execute(pool)
    .await?;
    find_by_date(pool, date)
        .await?
        .ok_or_else(|| super::RepoError::Database(format!("Failed to ensure night {date}")))
}

/// Idempotently materialize the slot rows for a night from the roster times.
pub async fn ensure_slots(
    pool: &SqlitePool,
    night_id: i64,
    start_times: &[String],
    max_orders: i64,
) -> RepoResult<()> {
    for time in start_times {
        let id = shared::util::snowflake_id();
        sqlx::query(
            "INSERT INTO time_slot (id, night_id, start_time, is_available, max_orders, \
             current_orders) VALUES (?1, ?2, ?3, 1, ?4, 0) \
             ON CONFLICT(night_id, start_time) DO NOTHING",
        )
        .bind(id)
        .bind(night_id)
        .bind(time)
        .bind(max_orders)
        .execute(pool)
        .await?;
    }
    Ok(())
}

pub async fn find_slots_by_night(pool: &SqlitePool, night_id: i64) -> RepoResult<Vec<TimeSlot>> {
    let sql = format!("{} WHERE night_id = ? ORDER BY start_time", SLOT_SELECT);
    let rows = sqlx::query_as::<_, TimeSlot>(&sql)
        .bind(night_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_slot_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<TimeSlot>> {
    let sql = format!("{} WHERE id = ?", SLOT_SELECT);
    let row = sqlx::query_as::<_, TimeSlot>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_slot_by_night_time(
    pool: &SqlitePool,
    night_id: i64,
    start_time: &str,
) -> RepoResult<Option<TimeSlot>> {
    let sql = format!("{} WHERE night_id = ? AND start_time = ?", SLOT_SELECT);
    let row = sqlx::query_as::<_, TimeSlot>(&sql)
        .bind(night_id)
        .bind(start_time)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Bump the occupancy cache after a committed booking.
///
/// The partial unique index on active orders is the source of truth; this
/// counter only keeps the cached `is_available` flag roughly honest.
pub async fn increment_slot_orders(pool: &SqlitePool, slot_id: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE time_slot SET current_orders = current_orders + 1, \
         is_available = CASE WHEN current_orders + 1 >= max_orders THEN 0 ELSE 1 END \
         WHERE id = ?",
    )
    .bind(slot_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Release the occupancy cache after an order is cancelled.
pub async fn release_slot_orders(pool: &SqlitePool, slot_id: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE time_slot SET current_orders = MAX(current_orders - 1, 0), is_available = 1 \
         WHERE id = ?",
    )
    .bind(slot_id)
    .execute(pool)
    .await?;
    Ok(())
}
