//! Scheduling core
//!
//! Which nights are offerable, which pickup slots each night has, and which
//! of those slots are still bookable right now.

pub mod availability;
pub mod nights;
pub mod provisioning;
pub mod roster;

pub use nights::{NightCandidate, current_nights};
pub use roster::SlotRoster;
