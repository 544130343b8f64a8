//! Admin Model
//!
//! The admin registry backing every privileged call. There is no admin
//! session: each lock/unlock/cancel request re-verifies against this table.

use serde::{Deserialize, Serialize};

use super::credential;

/// Admin registry entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl Admin {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        credential::verify_password(&self.hash_pass, password)
    }
}
