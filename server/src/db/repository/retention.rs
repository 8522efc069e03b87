//! Retention Repository

use super::{RepoError, RepoResult};
use shared::models::{RetentionCreate, RetentionRecord, RetentionUpdate};
use sqlx::SqlitePool;

const RETENTION_SELECT: &str = "SELECT id, member_id, outcome, contacted_on, notes, created_at, updated_at FROM retention_record";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<RetentionRecord>> {
    let sql = format!("{RETENTION_SELECT} ORDER BY contacted_on DESC, created_at DESC");
    let rows = sqlx::query_as::<_, RetentionRecord>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<RetentionRecord>> {
    let sql = format!("{RETENTION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, RetentionRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: RetentionCreate) -> RepoResult<RetentionRecord> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO retention_record (id, member_id, outcome, contacted_on, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(data.member_id)
    .bind(&data.outcome)
    .bind(data.contacted_on)
    .bind(&data.notes)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create retention record".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: RetentionUpdate,
) -> RepoResult<RetentionRecord> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE retention_record SET outcome = COALESCE(?1, outcome), contacted_on = COALESCE(?2, contacted_on), notes = COALESCE(?3, notes), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.outcome)
    .bind(data.contacted_on)
    .bind(&data.notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Retention record {id} not found"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Retention record {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM retention_record WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
