//! Member Model

use serde::{Deserialize, Serialize};

/// Member entity
///
/// `username` is derived at signup (first initial + last name, lowercased)
/// and unique across the club. `hash_pass` never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Member {
    /// Strip the credential hash for API responses
    pub fn into_public(self) -> MemberPublic {
        MemberPublic {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            phone: self.phone,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Member as exposed over the API (no credential material)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPublic {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: i64,
}

/// Signup payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSignup {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
}

/// Derive the club username from a member's name: first initial + last name,
/// lowercased, with inner whitespace removed from the last name.
pub fn derive_username(first_name: &str, last_name: &str) -> String {
    let initial = first_name.trim().chars().next().unwrap_or_default();
    let last: String = last_name
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("{}{}", initial, last).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_username() {
        assert_eq!(derive_username("Tony", "Soprano"), "tsoprano");
        assert_eq!(derive_username("  Mary ", " Van Dyke "), "mvandyke");
        assert_eq!(derive_username("É", "Núñez"), "énúñez");
    }

    #[test]
    fn test_hash_not_serialized() {
        let member = Member {
            id: 1,
            first_name: "Tony".into(),
            last_name: "Soprano".into(),
            username: "tsoprano".into(),
            phone: "5551234".into(),
            hash_pass: "$argon2id$secret".into(),
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_string(&member).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
