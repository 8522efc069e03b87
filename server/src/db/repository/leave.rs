//! Leave Repository

use super::{RepoError, RepoResult};
use shared::models::{LeaveCreate, LeaveRecord, LeaveStatus, LeaveUpdate};
use sqlx::SqlitePool;

const LEAVE_SELECT: &str = "SELECT id, member_id, reason, start_date, end_date, status, created_at, updated_at FROM leave_record";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<LeaveRecord>> {
    let sql = format!("{LEAVE_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, LeaveRecord>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<LeaveRecord>> {
    let sql = format!("{LEAVE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, LeaveRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: LeaveCreate) -> RepoResult<LeaveRecord> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO leave_record (id, member_id, reason, start_date, end_date, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 'pending', ?6, ?6)",
    )
    .bind(id)
    .bind(data.member_id)
    .bind(&data.reason)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create leave record".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: LeaveUpdate) -> RepoResult<LeaveRecord> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE leave_record SET reason = COALESCE(?1, reason), start_date = COALESCE(?2, start_date), end_date = COALESCE(?3, end_date), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.reason)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Leave record {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Leave record {id} not found")))
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: LeaveStatus) -> RepoResult<LeaveRecord> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE leave_record SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Leave record {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Leave record {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM leave_record WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete_by_member(pool: &SqlitePool, member_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM leave_record WHERE member_id = ?")
        .bind(member_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
