//! Nights API Handlers

use axum::{Json, extract::{Path, State}};
use serde::Serialize;

use shared::models::NightDay;

use crate::core::ServerState;
use crate::scheduling::{availability, current_nights};
use crate::utils::AppResult;
use crate::utils::time::{now_in, parse_date};

/// A currently offerable night with its bookable slots
#[derive(Debug, Serialize)]
pub struct NightView {
    pub date: String,
    pub day_of_week: NightDay,
    pub available_slots: Vec<String>,
}

/// GET /api/nights - the current weekend's nights with bookable slots
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<NightView>>> {
    let roster = &state.config.roster;
    let now = now_in(state.config.timezone);

    let mut views = Vec::new();
    for candidate in current_nights(now, roster.last_start()) {
        let available_slots =
            availability::available_slots(&state.pool, roster, candidate.date, &now).await?;
        views.push(NightView {
            date: candidate.date.format("%Y-%m-%d").to_string(),
            day_of_week: candidate.day,
            available_slots,
        });
    }
    Ok(Json(views))
}

/// GET /api/nights/{date}/slots - bookable slots for one night
pub async fn slots(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    let date = parse_date(&date)?;
    let now = now_in(state.config.timezone);
    let slots =
        availability::available_slots(&state.pool, &state.config.roster, date, &now).await?;
    Ok(Json(slots))
}
