//! Member Repository

use super::{RepoError, RepoResult};
use shared::models::Member;
use sqlx::SqlitePool;

const MEMBER_SELECT: &str = "SELECT id, first_name, last_name, username, phone, hash_pass, \
     is_active, created_at, updated_at FROM member";

/// Insert payload; username derivation and password hashing happen above
pub struct MemberInsert {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone: String,
    pub hash_pass: String,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Member>> {
    let sql = format!("{} WHERE is_active = 1 ORDER BY last_name, first_name", MEMBER_SELECT);
    let rows = sqlx::query_as::<_, Member>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Member>> {
    let sql = format!("{} WHERE id = ?", MEMBER_SELECT);
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Member>> {
    let sql = format!("{} WHERE username = ?", MEMBER_SELECT);
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All active members sharing a phone number. The order flow requires the
/// result to be unambiguous and rejects anything but exactly one match.
pub async fn find_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<Vec<Member>> {
    let sql = format!("{} WHERE is_active = 1 AND phone = ? ORDER BY created_at", MEMBER_SELECT);
    let rows = sqlx::query_as::<_, Member>(&sql)
        .bind(phone)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Create a member. The UNIQUE constraint on `username` surfaces as
/// [`RepoError::Duplicate`]; signup maps it to a username conflict.
pub async fn create(pool: &SqlitePool, data: MemberInsert) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO member (id, first_name, last_name, username, phone, hash_pass, \
         is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)",
    )
    .bind(id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.username)
    .bind(&data.phone)
    .bind(&data.hash_pass)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}
