//! Pizza Model

use serde::{Deserialize, Serialize};

/// Pizza catalog entry
///
/// `is_active` gates whether the pizza is offerable; inactive pizzas stay in
/// the table so historical orders keep a valid reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create pizza payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Update pizza payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
