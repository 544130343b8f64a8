//! Ordering core
//!
//! Resolving a human-entered pizza name against the catalog and committing
//! an order against a pickup slot.

pub mod matcher;
pub mod submit;

pub use matcher::{MatchOutcome, MatchStrategy, resolve_pizza};
pub use submit::{SubmitOrderRequest, SubmittedOrder, submit_order};
