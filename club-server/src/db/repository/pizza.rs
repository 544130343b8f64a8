//! Pizza Repository

use super::{RepoError, RepoResult};
use shared::models::{Pizza, PizzaCreate, PizzaUpdate};
use sqlx::SqlitePool;

const PIZZA_SELECT: &str =
    "SELECT id, name, description, is_active, created_at, updated_at FROM pizza";

/// All pizzas, active and retired (admin view)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Pizza>> {
    let sql = format!("{} ORDER BY name", PIZZA_SELECT);
    let rows = sqlx::query_as::<_, Pizza>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Active catalog, the only pizzas the order flow may resolve against
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Pizza>> {
    let sql = format!("{} WHERE is_active = 1 ORDER BY name", PIZZA_SELECT);
    let rows = sqlx::query_as::<_, Pizza>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Pizza>> {
    let sql = format!("{} WHERE id = ?", PIZZA_SELECT);
    let row = sqlx::query_as::<_, Pizza>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: PizzaCreate) -> RepoResult<Pizza> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO pizza (id, name, description, is_active, created_at, updated_at) \
         VALUES (?1, ?2, ?3, 1, ?4, ?4)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create pizza".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PizzaUpdate) -> RepoResult<Pizza> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE pizza SET name = COALESCE(?1, name), description = COALESCE(?2, description), \
         is_active = COALESCE(?3, is_active), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Pizza {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Pizza {id} not found")))
}

/// Soft delete; retired pizzas keep their id for historical orders
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE pizza SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
