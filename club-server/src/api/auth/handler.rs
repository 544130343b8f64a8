//! Member Auth Handlers
//!
//! Signup derives the club username and stores an argon2 hash; login
//! verifies with a fixed delay and a unified error so usernames cannot be
//! enumerated. There is no session or token: the order flow identifies
//! members by id/phone, and privileged calls carry admin credentials
//! per call.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::Deserialize;

use shared::error::ErrorCode;
use shared::models::{MemberPublic, MemberSignup, derive_username};

use crate::core::ServerState;
use crate::db::models::credential;
use crate::db::repository::{RepoError, member};
use crate::utils::validation::{
    MAX_NAME_LEN, validate_password, validate_phone, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/signup - create a member account
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<MemberSignup>,
) -> AppResult<Json<MemberPublic>> {
    validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_phone(&payload.phone)?;
    validate_password(&payload.password)?;

    let username = derive_username(&payload.first_name, &payload.last_name);
    let hash_pass = credential::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let insert = member::MemberInsert {
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        username: username.clone(),
        phone: payload.phone.trim().to_string(),
        hash_pass,
    };

    let created = match member::create(&state.pool, insert).await {
        Ok(m) => m,
        // The store's UNIQUE constraint is the authority on username clashes
        Err(RepoError::Duplicate(_)) => {
            return Err(AppError::with_message(
                ErrorCode::UsernameExists,
                format!("Username '{username}' is already taken"),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(member_id = created.id, username = %created.username, "Member signed up");
    Ok(Json(created.into_public()))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login - verify member credentials
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<MemberPublic>> {
    let found = member::find_by_username(&state.pool, &req.username).await?;

    // Fixed delay before acting on the lookup result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let Some(found) = found else {
        tracing::warn!(username = %req.username, "Login failed - user not found");
        return Err(AppError::invalid_credentials());
    };

    if !found.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let password_valid = credential::verify_password(&found.hash_pass, &req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

    if !password_valid {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    tracing::info!(member_id = found.id, username = %found.username, "Member logged in");
    Ok(Json(found.into_public()))
}
