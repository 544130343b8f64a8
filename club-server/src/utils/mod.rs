//! Utility module - shared helpers and types
//!
//! Re-exports the unified error types from `shared::error` alongside local
//! helpers for logging, time conversion and input validation.

pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use result::AppResult;
pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
