//! Shared types for the Pizza Club stack
//!
//! Common types used by the club server and its clients: domain models,
//! error types, response structures, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
