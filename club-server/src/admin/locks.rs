//! Admin slot lock/unlock service
//!
//! Locks are (date, time) records independent of provisioned slot rows.
//! Both directions are idempotent: locking a locked slot and unlocking an
//! unlocked one are no-op successes.

use serde::Deserialize;
use sqlx::SqlitePool;

use shared::models::LockedSlot;

use crate::db::repository::locked_slot;
use crate::utils::AppResult;
use crate::utils::time::{format_slot_time, parse_date, parse_slot_time};

use super::{AdminCredentials, verify_admin};

/// Lock or unlock a single (date, time) pair
#[derive(Debug, Clone, Deserialize)]
pub struct SlotLockRequest {
    pub date: String,
    pub time: String,
    pub locked: bool,
}

/// Set the lock state for a slot. Re-verifies the admin on every call.
pub async fn set_slot_lock(
    pool: &SqlitePool,
    creds: &AdminCredentials,
    req: &SlotLockRequest,
) -> AppResult<()> {
    let admin = verify_admin(pool, creds).await?;

    let date = parse_date(&req.date)?;
    let time_str = format_slot_time(parse_slot_time(&req.time)?);
    let date_str = date.format("%Y-%m-%d").to_string();

    if req.locked {
        let newly_locked =
            locked_slot::lock(pool, &date_str, &time_str, Some(&admin.username)).await?;
        tracing::info!(
            admin = %admin.username,
            date = %date_str,
            time = %time_str,
            newly_locked,
            "Slot locked"
        );
    } else {
        let removed = locked_slot::unlock(pool, &date_str, &time_str).await?;
        tracing::info!(
            admin = %admin.username,
            date = %date_str,
            time = %time_str,
            removed,
            "Slot unlocked"
        );
    }

    Ok(())
}

/// List locks for a date. Re-verifies the admin on every call.
pub async fn list_locks(
    pool: &SqlitePool,
    creds: &AdminCredentials,
    date: &str,
) -> AppResult<Vec<LockedSlot>> {
    verify_admin(pool, creds).await?;
    let date = parse_date(date)?.format("%Y-%m-%d").to_string();
    Ok(locked_slot::find_by_date(pool, &date).await?)
}
