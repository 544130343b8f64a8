//! Admin Registry Repository

use super::{RepoError, RepoResult};
use crate::db::models::Admin;
use sqlx::SqlitePool;

const ADMIN_SELECT: &str =
    "SELECT id, username, display_name, hash_pass, is_active, created_at FROM admin";

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Admin>> {
    let sql = format!("{} WHERE username = ?", ADMIN_SELECT);
    let row = sqlx::query_as::<_, Admin>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    display_name: &str,
    hash_pass: &str,
) -> RepoResult<Admin> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO admin (id, username, display_name, hash_pass, is_active, created_at) \
         VALUES (?1, ?2, ?3, ?4, 1, ?5)",
    )
    .bind(id)
    .bind(username)
    .bind(display_name)
    .bind(hash_pass)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_username(pool, username)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin".into()))
}
