//! Night and TimeSlot Models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day tag for a club night; the club only runs Fridays and Saturdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum NightDay {
    Friday,
    Saturday,
}

impl NightDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }
}

impl fmt::Display for NightDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled club night
///
/// `date` is the calendar date in `YYYY-MM-DD`; `day_of_week` is constrained
/// to Friday/Saturday by both the model and a table CHECK.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Night {
    pub id: i64,
    pub date: String,
    pub day_of_week: NightDay,
    pub is_active: bool,
    pub created_at: i64,
}

/// A pickup time slot belonging to a night
///
/// `is_available` and `current_orders` are caches of the authoritative
/// availability computation; booking correctness is enforced by the partial
/// unique index on active orders, not by these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TimeSlot {
    pub id: i64,
    pub night_id: i64,
    /// Start time in `HH:MM`
    pub start_time: String,
    pub is_available: bool,
    pub max_orders: i64,
    pub current_orders: i64,
}

/// Administrative lock on a (date, time) pair
///
/// A standalone record rather than a flag on [`TimeSlot`]: locks can exist
/// for slots that have not been provisioned yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LockedSlot {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub locked_by: Option<String>,
    pub created_at: i64,
}
