//! Admin Account Repository

use super::{RepoError, RepoResult};
use shared::models::Admin;
use sqlx::SqlitePool;

const ADMIN_SELECT: &str =
    "SELECT id, username, password_hash, display_name, is_active, created_at FROM admin";

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Admin>> {
    let sql = format!("{ADMIN_SELECT} WHERE username = ?");
    let row = sqlx::query_as::<_, Admin>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Admin>> {
    let sql = format!("{ADMIN_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Admin>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    display_name: &str,
) -> RepoResult<Admin> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO admin (id, username, password_hash, display_name, is_active, created_at) VALUES (?1, ?2, ?3, ?4, 1, ?5)",
    )
    .bind(id)
    .bind(username)
    .bind(password_hash)
    .bind(display_name)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin".into()))
}
