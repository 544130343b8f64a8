//! Order API Handlers

use axum::{Json, extract::{Path, State}};

use shared::error::ErrorCode;
use shared::models::OrderDetail;

use crate::core::ServerState;
use crate::db::repository::order;
use crate::ordering::{SubmitOrderRequest, SubmittedOrder, submit_order};
use crate::utils::{ApiResponse, AppError, AppResult};

/// POST /api/orders - submit an order for a pickup slot
///
/// Success: `{code: 0, data: {order_id}}`. Failures carry the step-specific
/// error code (member, pizza, slot) so the screen can say what went wrong.
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrderRequest>,
) -> AppResult<ApiResponse<SubmittedOrder>> {
    let submitted = submit_order(&state, payload).await?;
    Ok(ApiResponse::success(submitted))
}

/// GET /api/orders/{id} - fetch one order with member/pizza/slot joined
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
        })?;
    Ok(Json(detail))
}
