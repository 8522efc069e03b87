//! Black Point Repository

use super::{RepoError, RepoResult};
use shared::models::{BlackPointCreate, BlackPointRecord, BlackPointUpdate};
use sqlx::SqlitePool;

const BLACK_POINT_SELECT: &str = "SELECT id, member_id, points, reason, recorded_on, created_at, updated_at FROM black_point";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<BlackPointRecord>> {
    let sql = format!("{BLACK_POINT_SELECT} ORDER BY recorded_on DESC, created_at DESC");
    let rows = sqlx::query_as::<_, BlackPointRecord>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<BlackPointRecord>> {
    let sql = format!("{BLACK_POINT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, BlackPointRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: BlackPointCreate) -> RepoResult<BlackPointRecord> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO black_point (id, member_id, points, reason, recorded_on, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(data.member_id)
    .bind(data.points)
    .bind(&data.reason)
    .bind(data.recorded_on)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create black point record".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: BlackPointUpdate,
) -> RepoResult<BlackPointRecord> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE black_point SET points = COALESCE(?1, points), reason = COALESCE(?2, reason), recorded_on = COALESCE(?3, recorded_on), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.points)
    .bind(&data.reason)
    .bind(data.recorded_on)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Black point record {id} not found"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Black point record {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM black_point WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete_by_member(pool: &SqlitePool, member_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM black_point WHERE member_id = ?")
        .bind(member_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
