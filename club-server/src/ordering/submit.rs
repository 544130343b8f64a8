//! Order submission service
//!
//! The transactional core of the club: resolve the member, resolve the
//! pizza, verify the slot, commit the order, bump the occupancy cache, and
//! fire the confirmation. Each resolution step is terminal on failure;
//! there is no silent retry with relaxed matching, and every failure mode
//! has its own error code so a member can tell *which* step rejected them.

use serde::{Deserialize, Serialize};

use shared::error::ErrorCode;
use shared::models::{Member, Pizza};
use sqlx::SqlitePool;

use crate::core::ServerState;
use crate::db::repository::{RepoError, locked_slot, member, night, order, pizza};
use crate::db::repository::order::BookingOutcome;
use crate::notify;
use crate::utils::time::{format_slot_time, now_in, parse_date, parse_slot_time, slot_is_past};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

use super::matcher::{MatchOutcome, resolve_pizza};

/// Public submission payload, as sent by the ordering screen
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitOrderRequest {
    /// Stable member reference, the preferred resolution path
    pub member_id: Option<i64>,
    /// Fallback lookup key when `member_id` is absent or stale
    pub phone: Option<String>,
    /// Human-entered pizza name ("Margherita Pizza", "margherita", ...)
    pub pizza_name: String,
    /// Night date, `YYYY-MM-DD`
    pub pickup_date: String,
    /// Slot start, `HH:MM`
    pub pickup_time: String,
}

/// Successful submission result
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedOrder {
    pub order_id: i64,
}

/// Submit an order against a pickup slot.
pub async fn submit_order(
    state: &ServerState,
    req: SubmitOrderRequest,
) -> AppResult<SubmittedOrder> {
    let pool = &state.pool;

    // Input validation, rejected before any store call
    validate_required_text(&req.pizza_name, "pizza_name", MAX_NAME_LEN)?;
    let date = parse_date(&req.pickup_date)?;
    let slot_time = parse_slot_time(&req.pickup_time)?;
    let time_str = format_slot_time(slot_time);

    // 1. Member resolution: id first, phone fallback, exactly one or bust
    let member = resolve_member(pool, req.member_id, req.phone.as_deref()).await?;

    // 2. Pizza resolution through the matcher tiers
    let pizza = resolve_catalog_pizza(pool, &req.pizza_name).await?;

    // 3. Slot verification against the roster, the clock, the slot row and
    //    the lock table. This re-check closes the window between the UI
    //    rendering "available" and the member pressing submit.
    let roster = &state.config.roster;
    if !roster.contains(slot_time) {
        return Err(AppError::with_message(
            ErrorCode::SlotNotFound,
            format!("{time_str} is not a pickup slot"),
        )
        .with_detail("roster", roster.time_strings()));
    }

    let now = now_in(state.config.timezone);
    if slot_is_past(date, slot_time, &now) {
        return Err(AppError::with_message(
            ErrorCode::SlotInPast,
            format!("{} {} has already passed", req.pickup_date, time_str),
        ));
    }

    // On-demand provisioning: rejects dates that are not Friday/Saturday
    let night_row =
        crate::scheduling::provisioning::ensure_night_with_slots(pool, roster, date).await?;

    let slot = night::find_slot_by_night_time(pool, night_row.id, &time_str)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::SlotNotFound,
                format!("No slot at {time_str} on {}", req.pickup_date),
            )
        })?;

    if locked_slot::is_locked(pool, &night_row.date, &time_str).await? {
        return Err(AppError::with_message(
            ErrorCode::SlotLocked,
            format!("{} {time_str} is locked, pick another slot", req.pickup_date),
        ));
    }

    if !slot.is_available || slot.current_orders >= slot.max_orders {
        return Err(slot_taken(&req.pickup_date, &time_str));
    }

    // 4. Commit. The insert is conditional on the slot row still reporting
    //    capacity and no lock existing, all in one statement; a concurrent
    //    occupant trips the active-slot unique index instead.
    let committed = match order::try_book(pool, member.id, pizza.id, slot.id).await {
        Ok(BookingOutcome::Booked(order_row)) => order_row,
        Ok(BookingOutcome::Rejected) => {
            // Re-diagnose: a lock may have landed between the pre-check and
            // the insert.
            if locked_slot::is_locked(pool, &night_row.date, &time_str).await? {
                return Err(AppError::with_message(
                    ErrorCode::SlotLocked,
                    format!("{} {time_str} is locked, pick another slot", req.pickup_date),
                ));
            }
            return Err(slot_taken(&req.pickup_date, &time_str));
        }
        Err(RepoError::Duplicate(_)) => {
            tracing::info!(
                slot_id = slot.id,
                time = %time_str,
                "Concurrent booking lost the slot race"
            );
            return Err(slot_taken(&req.pickup_date, &time_str));
        }
        Err(e) => return Err(e.into()),
    };

    // 5. Post-commit: occupancy cache bump. The order already stands; a
    //    failure here is a repairable anomaly, never a rollback.
    if let Err(e) = night::increment_slot_orders(pool, slot.id).await {
        tracing::warn!(
            order_id = committed.id,
            slot_id = slot.id,
            error = %e,
            "Slot counter update failed after order commit; cache will be reconciled"
        );
    }

    // 6. Confirmation dispatch: fire and forget, outcome only logged
    let text = format!(
        "Pizza Club: your {} is confirmed for pickup on {} at {}.",
        pizza.name, req.pickup_date, time_str
    );
    notify::dispatch(state.notifier.clone(), member.phone.clone(), text);

    tracing::info!(
        order_id = committed.id,
        member_id = member.id,
        pizza = %pizza.name,
        date = %req.pickup_date,
        time = %time_str,
        "Order confirmed"
    );

    Ok(SubmittedOrder {
        order_id: committed.id,
    })
}

fn slot_taken(date: &str, time: &str) -> AppError {
    AppError::with_message(
        ErrorCode::SlotUnavailable,
        format!("{date} {time} was just taken, pick another slot"),
    )
}

/// Resolve the ordering member: stable id first, phone fallback. Anything
/// other than exactly one active record fails the submission.
async fn resolve_member(
    pool: &SqlitePool,
    member_id: Option<i64>,
    phone: Option<&str>,
) -> AppResult<Member> {
    if let Some(id) = member_id {
        match member::find_by_id(pool, id).await? {
            Some(m) if m.is_active => {
                tracing::debug!(member_id = id, "Member resolved by id");
                return Ok(m);
            }
            _ => tracing::debug!(member_id = id, "Member id unknown, trying phone fallback"),
        }
    }

    let Some(phone) = phone.filter(|p| !p.trim().is_empty()) else {
        return Err(AppError::with_message(
            ErrorCode::MemberNotFound,
            "No member reference and no phone number to look up",
        ));
    };

    let mut matches = member::find_by_phone(pool, phone).await?;
    match matches.len() {
        1 => {
            let m = matches.remove(0);
            tracing::debug!(member_id = m.id, "Member resolved by phone");
            Ok(m)
        }
        0 => Err(AppError::with_message(
            ErrorCode::MemberNotFound,
            format!("No member with phone {phone}"),
        )),
        n => Err(AppError::with_message(
            ErrorCode::MemberNotFound,
            format!("Phone {phone} matches {n} members; use the member id"),
        )
        .with_detail("matches", n as i64)),
    }
}

/// Resolve the pizza through the matcher tiers, logging which one won.
async fn resolve_catalog_pizza(pool: &SqlitePool, raw_name: &str) -> AppResult<Pizza> {
    let catalog = pizza::find_active(pool).await?;
    match resolve_pizza(raw_name, &catalog) {
        MatchOutcome::Matched { strategy, pizza } => {
            tracing::info!(
                query = %raw_name,
                matched = %pizza.name,
                strategy = strategy.as_str(),
                "Pizza resolved"
            );
            Ok(pizza)
        }
        MatchOutcome::NoMatch { term, available } => {
            let names = available.join(", ");
            Err(AppError::with_message(
                ErrorCode::PizzaNotFound,
                format!("No pizza matching '{term}'. On the menu: {names}"),
            )
            .with_detail("term", term)
            .with_detail("available", available))
        }
    }
}
