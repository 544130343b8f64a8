//! LockedSlot Repository
//!
//! Administrative locks are standalone (date, time) records so a slot can be
//! locked before its night is provisioned. Lock and unlock are idempotent.

use super::RepoResult;
use shared::models::LockedSlot;
use sqlx::SqlitePool;

const LOCK_SELECT: &str =
    "SELECT id, date, start_time, locked_by, created_at FROM locked_slot";

/// Insert a lock. Returns `false` when the (date, time) pair was already
/// locked (a no-op success, not an error).
pub async fn lock(
    pool: &SqlitePool,
    date: &str,
    start_time: &str,
    locked_by: Option<&str>,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let rows = sqlx::query(
        "INSERT INTO locked_slot (id, date, start_time, locked_by, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(date, start_time) DO NOTHING",
    )
    .bind(id)
    .bind(date)
    .bind(start_time)
    .bind(locked_by)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete a lock. Returns `false` when nothing was locked, also a no-op
/// success.
pub async fn unlock(pool: &SqlitePool, date: &str, start_time: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM locked_slot WHERE date = ? AND start_time = ?")
        .bind(date)
        .bind(start_time)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn find_by_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<LockedSlot>> {
    let sql = format!("{} WHERE date = ? ORDER BY start_time", LOCK_SELECT);
    let rows = sqlx::query_as::<_, LockedSlot>(&sql)
        .bind(date)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Locked start times for a date, one half of the availability taken-set.
pub async fn times_for_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<String>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT start_time FROM locked_slot WHERE date = ?")
            .bind(date)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(t,)| t).collect())
}

pub async fn is_locked(pool: &SqlitePool, date: &str, start_time: &str) -> RepoResult<bool> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM locked_slot WHERE date = ? AND start_time = ?")
            .bind(date)
            .bind(start_time)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}
