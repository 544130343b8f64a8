//! Admin API Handlers
//!
//! Thin wrappers over the admin services; request DTOs flatten the
//! credentials next to the operation arguments.

use axum::{Json, extract::{Path, State}};
use serde::Deserialize;

use shared::error::ErrorCode;
use shared::models::{
    LockedSlot, MemberPublic, Order, OrderDetail, OrderStatus, Pizza, PizzaCreate, PizzaUpdate,
};

use crate::admin::locks::SlotLockRequest;
use crate::admin::{AdminCredentials, locks, orders, verify_admin};
use crate::core::ServerState;
use crate::db::repository::{RepoError, member, pizza};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult};

// ── Orders ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListOrdersRequest {
    #[serde(flatten)]
    pub creds: AdminCredentials,
    pub date: String,
}

/// POST /api/admin/orders/list - kitchen display for a date
pub async fn list_orders(
    State(state): State<ServerState>,
    Json(req): Json<ListOrdersRequest>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let list = orders::list_for_date(&state.pool, &req.creds, &req.date).await?;
    Ok(Json(list))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(flatten)]
    pub creds: AdminCredentials,
    pub status: OrderStatus,
}

/// POST /api/admin/orders/{id}/status - advance the kitchen flow
pub async fn update_order_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let updated = orders::update_status(&state.pool, &req.creds, id, req.status).await?;
    Ok(Json(updated))
}

/// POST /api/admin/orders/{id}/cancel - hard-delete an order
pub async fn cancel_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(creds): Json<AdminCredentials>,
) -> AppResult<ApiResponse<()>> {
    orders::cancel_order(&state.pool, &creds, id).await?;
    Ok(ApiResponse::ok())
}

// ── Slot locks ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetSlotLockRequest {
    #[serde(flatten)]
    pub creds: AdminCredentials,
    #[serde(flatten)]
    pub lock: SlotLockRequest,
}

/// POST /api/admin/slot-locks - lock or unlock a (date, time) pair
pub async fn set_slot_lock(
    State(state): State<ServerState>,
    Json(req): Json<SetSlotLockRequest>,
) -> AppResult<ApiResponse<()>> {
    locks::set_slot_lock(&state.pool, &req.creds, &req.lock).await?;
    Ok(ApiResponse::ok())
}

#[derive(Debug, Deserialize)]
pub struct ListSlotLocksRequest {
    #[serde(flatten)]
    pub creds: AdminCredentials,
    pub date: String,
}

/// POST /api/admin/slot-locks/list - locks for a date
pub async fn list_slot_locks(
    State(state): State<ServerState>,
    Json(req): Json<ListSlotLocksRequest>,
) -> AppResult<Json<Vec<LockedSlot>>> {
    let list = locks::list_locks(&state.pool, &req.creds, &req.date).await?;
    Ok(Json(list))
}

// ── Menu management ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreatePizzaRequest {
    #[serde(flatten)]
    pub creds: AdminCredentials,
    pub pizza: PizzaCreate,
}

/// POST /api/admin/pizzas - add a pizza to the menu
pub async fn create_pizza(
    State(state): State<ServerState>,
    Json(req): Json<CreatePizzaRequest>,
) -> AppResult<Json<Pizza>> {
    verify_admin(&state.pool, &req.creds).await?;
    validate_required_text(&req.pizza.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.pizza.description, "description", MAX_NOTE_LEN)?;

    match pizza::create(&state.pool, req.pizza).await {
        Ok(created) => {
            tracing::info!(pizza_id = created.id, name = %created.name, "Pizza created");
            Ok(Json(created))
        }
        Err(RepoError::Duplicate(_)) => Err(AppError::with_message(
            ErrorCode::PizzaNameExists,
            "A pizza with that name already exists",
        )),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePizzaRequest {
    #[serde(flatten)]
    pub creds: AdminCredentials,
    pub pizza: PizzaUpdate,
}

/// POST /api/admin/pizzas/{id}/update - edit a menu entry
pub async fn update_pizza(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePizzaRequest>,
) -> AppResult<Json<Pizza>> {
    verify_admin(&state.pool, &req.creds).await?;
    if let Some(ref name) = req.pizza.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&req.pizza.description, "description", MAX_NOTE_LEN)?;

    match pizza::update(&state.pool, id, req.pizza).await {
        Ok(updated) => Ok(Json(updated)),
        Err(RepoError::Duplicate(_)) => Err(AppError::with_message(
            ErrorCode::PizzaNameExists,
            "A pizza with that name already exists",
        )),
        Err(e) => Err(e.into()),
    }
}

/// POST /api/admin/pizzas/{id}/delete - retire a menu entry (soft delete)
pub async fn delete_pizza(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(creds): Json<AdminCredentials>,
) -> AppResult<Json<bool>> {
    verify_admin(&state.pool, &creds).await?;
    let removed = pizza::delete(&state.pool, id).await?;
    if removed {
        tracing::info!(pizza_id = id, "Pizza retired");
    }
    Ok(Json(removed))
}

// ── Members ─────────────────────────────────────────────────────────

/// POST /api/admin/members/list - the member roster
pub async fn list_members(
    State(state): State<ServerState>,
    Json(creds): Json<AdminCredentials>,
) -> AppResult<Json<Vec<MemberPublic>>> {
    verify_admin(&state.pool, &creds).await?;
    let members = member::find_all(&state.pool).await?;
    Ok(Json(members.into_iter().map(|m| m.into_public()).collect()))
}
