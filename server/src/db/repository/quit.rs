//! Quit Request Repository

use super::{RepoError, RepoResult};
use shared::models::{QuitCreate, QuitRequest, QuitStatus};
use sqlx::SqlitePool;

const QUIT_SELECT: &str = "SELECT id, member_id, reason, status, requested_at, resolved_at, created_at, updated_at FROM quit_request";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<QuitRequest>> {
    let sql = format!("{QUIT_SELECT} ORDER BY requested_at DESC");
    let rows = sqlx::query_as::<_, QuitRequest>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<QuitRequest>> {
    let sql = format!("{QUIT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, QuitRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: QuitCreate) -> RepoResult<QuitRequest> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO quit_request (id, member_id, reason, status, requested_at, created_at, updated_at) VALUES (?1, ?2, ?3, 'pending', ?4, ?4, ?4)",
    )
    .bind(id)
    .bind(data.member_id)
    .bind(&data.reason)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create quit request".into()))
}

/// 审批落章：pending -> approved/rejected，只允许一次
pub async fn resolve(pool: &SqlitePool, id: i64, status: QuitStatus) -> RepoResult<QuitRequest> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE quit_request SET status = ?1, resolved_at = ?2, updated_at = ?2 WHERE id = ?3 AND status = 'pending'",
    )
    .bind(status)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Validation(format!(
            "Quit request {id} is not pending"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Quit request {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM quit_request WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
