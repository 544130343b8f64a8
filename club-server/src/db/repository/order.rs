//! Order Repository
//!
//! Holds the conditional booking insert: the single-statement
//! compare-and-commit that closes the double-booking race. The partial
//! unique index on active orders is the final arbiter; the conditional
//! WHERE re-checks the occupancy cache and the lock table in the same
//! atomic statement.

use super::RepoResult;
use shared::models::{Order, OrderDetail, OrderStatus};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, member_id, pizza_id, time_slot_id, fulfillment, status, \
     created_at, updated_at FROM pizza_order";

const DETAIL_SELECT: &str = "SELECT o.id, o.member_id, \
     (m.first_name || ' ' || m.last_name) AS member_name, m.phone, \
     o.pizza_id, p.name AS pizza_name, n.date AS night_date, ts.start_time, \
     o.status, o.created_at \
     FROM pizza_order o \
     JOIN member m ON o.member_id = m.id \
     JOIN pizza p ON o.pizza_id = p.id \
     JOIN time_slot ts ON o.time_slot_id = ts.id \
     JOIN night n ON ts.night_id = n.id";

/// Outcome of the conditional booking insert
#[derive(Debug)]
pub enum BookingOutcome {
    /// Order row inserted
    Booked(Order),
    /// The conditional WHERE rejected the insert: slot missing, occupancy
    /// cache full, or an administrative lock exists for the (date, time)
    Rejected,
}

/// Atomically book a slot: insert the order only if the slot row still
/// reports capacity and no lock covers it. A concurrent occupant surfaces
/// as a unique violation on the active-slot index ([`super::RepoError::Duplicate`]).
pub async fn try_book(
    pool: &SqlitePool,
    member_id: i64,
    pizza_id: i64,
    slot_id: i64,
) -> RepoResult<BookingOutcome> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let rows = sqlx::query(
        "INSERT INTO pizza_order (id, member_id, pizza_id, time_slot_id, fulfillment, status, \
         created_at, updated_at) \
         SELECT ?1, ?2, ?3, ts.id, 'pickup', 'pending', ?4, ?4 \
         FROM time_slot ts \
         JOIN night n ON n.id = ts.night_id \
         WHERE ts.id = ?5 \
           AND ts.is_available = 1 \
           AND ts.current_orders < ts.max_orders \
           AND NOT EXISTS ( \
               SELECT 1 FROM locked_slot l \
               WHERE l.date = n.date AND l.start_time = ts.start_time \
           )",
    )
    .bind(id)
    .bind(member_id)
    .bind(pizza_id)
    .bind(now)
    .bind(slot_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Ok(BookingOutcome::Rejected);
    }

    let order = find_by_id(pool, id)
        .await?
        .ok_or_else(|| super::RepoError::Database("Booked order vanished after insert".into()))?;
    Ok(BookingOutcome::Booked(order))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE id = ?", ORDER_SELECT);
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_detail_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let sql = format!("{} WHERE o.id = ?", DETAIL_SELECT);
    let row = sqlx::query_as::<_, OrderDetail>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Kitchen display view: all orders for a night's date, slot order
pub async fn find_details_by_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<OrderDetail>> {
    let sql = format!("{} WHERE n.date = ? ORDER BY ts.start_time", DETAIL_SELECT);
    let rows = sqlx::query_as::<_, OrderDetail>(&sql)
        .bind(date)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Start times consumed by non-cancelled orders for a date, the other
/// half of the availability taken-set.
pub async fn active_slot_times_for_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT ts.start_time FROM pizza_order o \
         JOIN time_slot ts ON o.time_slot_id = ts.id \
         JOIN night n ON ts.night_id = n.id \
         WHERE n.date = ? AND o.status != 'cancelled'",
    )
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(t,)| t).collect())
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE pizza_order SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(super::RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| super::RepoError::NotFound(format!("Order {id} not found")))
}

/// Hard delete (admin cancellation). The slot re-opens the next time the
/// availability resolver runs, since only extant orders count as taken.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM pizza_order WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
