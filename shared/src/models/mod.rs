//! Domain models for the Pizza Club stack

pub mod member;
pub mod night;
pub mod order;
pub mod pizza;

// Re-exports
pub use member::{Member, MemberPublic, MemberSignup, derive_username};
pub use night::{LockedSlot, Night, NightDay, TimeSlot};
pub use order::{Order, OrderDetail, OrderStatus};
pub use pizza::{Pizza, PizzaCreate, PizzaUpdate};
