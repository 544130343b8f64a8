//! Admin services
//!
//! There is no admin session and no process-wide "current admin": every
//! privileged call carries credentials and is re-verified against the admin
//! registry here. A forged client that skips the login screen gains nothing.

pub mod locks;
pub mod orders;

use std::time::Duration;

use serde::Deserialize;
use sqlx::SqlitePool;

use shared::error::ErrorCode;

use crate::db::models::{Admin, credential};
use crate::db::repository::admin as admin_repo;
use crate::utils::{AppError, AppResult};

/// Fixed delay for credential verification to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Username used when the registry is bootstrapped empty
const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Per-call admin credentials, embedded in every privileged request body
#[derive(Clone, Deserialize)]
pub struct AdminCredentials {
    pub admin_username: String,
    pub admin_password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

/// Verify admin credentials against the registry.
///
/// Unified failure message for unknown usernames and wrong passwords, with
/// a fixed delay before the result, so the registry cannot be enumerated.
pub async fn verify_admin(pool: &SqlitePool, creds: &AdminCredentials) -> AppResult<Admin> {
    let admin = admin_repo::find_by_username(pool, &creds.admin_username).await?;

    // Fixed delay before acting on the lookup result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let Some(admin) = admin else {
        tracing::warn!(username = %creds.admin_username, "Admin verification failed - unknown username");
        return Err(AppError::admin_required("Invalid admin credentials"));
    };

    if !admin.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let password_valid = admin
        .verify_password(&creds.admin_password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

    if !password_valid {
        tracing::warn!(username = %creds.admin_username, "Admin verification failed - wrong password");
        return Err(AppError::admin_required("Invalid admin credentials"));
    }

    Ok(admin)
}

/// Bootstrap the registry with a default admin when it is empty.
pub async fn ensure_default_admin(pool: &SqlitePool, password: Option<&str>) -> AppResult<()> {
    if admin_repo::count(pool).await? > 0 {
        return Ok(());
    }

    let Some(password) = password.filter(|p| !p.is_empty()) else {
        tracing::warn!(
            "Admin registry is empty and ADMIN_PASSWORD is not set; \
             no admin account created"
        );
        return Ok(());
    };

    let hash = credential::hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
    admin_repo::create(pool, DEFAULT_ADMIN_USERNAME, "Club Admin", &hash).await?;
    tracing::info!(username = DEFAULT_ADMIN_USERNAME, "Default admin account created");
    Ok(())
}
