//! Admin order services - kitchen display, status flow, cancellation
//!
//! Cancellation hard-deletes the order row; the slot re-opens the next time
//! the availability resolver runs, since only extant orders count as taken.
//! The occupancy cache is released best-effort on top of that.

use sqlx::SqlitePool;

use shared::error::ErrorCode;
use shared::models::{Order, OrderDetail, OrderStatus};

use crate::db::repository::{night, order};
use crate::utils::time::parse_date;
use crate::utils::{AppError, AppResult};

use super::{AdminCredentials, verify_admin};

/// Kitchen display: all orders for a date. Re-verifies the admin per call.
pub async fn list_for_date(
    pool: &SqlitePool,
    creds: &AdminCredentials,
    date: &str,
) -> AppResult<Vec<OrderDetail>> {
    verify_admin(pool, creds).await?;
    let date = parse_date(date)?.format("%Y-%m-%d").to_string();
    Ok(order::find_details_by_date(pool, &date).await?)
}

/// Advance an order through the kitchen flow. Invalid jumps are conflicts,
/// not silent corrections.
pub async fn update_status(
    pool: &SqlitePool,
    creds: &AdminCredentials,
    order_id: i64,
    next: OrderStatus,
) -> AppResult<Order> {
    let admin = verify_admin(pool, creds).await?;

    let current = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {order_id} not found"))
        })?;

    if !current.status.can_transition_to(next) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot move order {order_id} from {} to {}", current.status, next),
        ));
    }

    let updated = order::update_status(pool, order_id, next).await?;
    tracing::info!(
        order_id,
        admin = %admin.username,
        from = %current.status,
        to = %next,
        "Order status updated"
    );
    Ok(updated)
}

/// Cancel (hard-delete) an order. Re-verifies the admin per call.
pub async fn cancel_order(
    pool: &SqlitePool,
    creds: &AdminCredentials,
    order_id: i64,
) -> AppResult<()> {
    let admin = verify_admin(pool, creds).await?;

    let existing = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {order_id} not found"))
        })?;

    order::delete(pool, order_id).await?;

    // Occupancy cache release; the delete alone already re-opened the slot
    // for the availability computation.
    if let Err(e) = night::release_slot_orders(pool, existing.time_slot_id).await {
        tracing::warn!(
            order_id,
            slot_id = existing.time_slot_id,
            error = %e,
            "Slot counter release failed after cancellation; cache will be reconciled"
        );
    }

    tracing::info!(
        order_id,
        admin = %admin.username,
        slot_id = existing.time_slot_id,
        "Order cancelled"
    );
    Ok(())
}
