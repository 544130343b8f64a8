//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
///
/// Admin cancellation hard-deletes the row, so `Cancelled` only appears
/// transiently; the active-slot unique index still excludes it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    PickedUp,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::PickedUp => "picked_up",
            Self::Cancelled => "cancelled",
        }
    }

    /// Kitchen flow: pending → preparing → ready → picked_up.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Preparing)
                | (Self::Preparing, Self::Ready)
                | (Self::Ready, Self::PickedUp)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity (normalized foreign-key schema)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub member_id: i64,
    pub pizza_id: i64,
    pub time_slot_id: i64,
    pub fulfillment: String,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order with joined member/pizza/slot info (kitchen display view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderDetail {
    pub id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub phone: String,
    pub pizza_id: i64,
    pub pizza_name: String,
    pub night_date: String,
    pub start_time: String,
    pub status: OrderStatus,
    pub created_at: i64,
}
