//! Assessment Repository

use super::{RepoError, RepoResult};
use shared::models::{Assessment, AssessmentCreate, AssessmentUpdate};
use sqlx::SqlitePool;

const ASSESSMENT_SELECT: &str = "SELECT id, member_id, course_id, result, score, assessed_on, notes, created_at, updated_at FROM assessment";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Assessment>> {
    let sql = format!("{ASSESSMENT_SELECT} ORDER BY assessed_on DESC, created_at DESC");
    let rows = sqlx::query_as::<_, Assessment>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_member(pool: &SqlitePool, member_id: i64) -> RepoResult<Vec<Assessment>> {
    let sql = format!("{ASSESSMENT_SELECT} WHERE member_id = ? ORDER BY assessed_on DESC");
    let rows = sqlx::query_as::<_, Assessment>(&sql)
        .bind(member_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Assessment>> {
    let sql = format!("{ASSESSMENT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Assessment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: AssessmentCreate) -> RepoResult<Assessment> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO assessment (id, member_id, course_id, result, score, assessed_on, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(data.member_id)
    .bind(data.course_id)
    .bind(&data.result)
    .bind(data.score)
    .bind(data.assessed_on)
    .bind(&data.notes)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create assessment".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: AssessmentUpdate) -> RepoResult<Assessment> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE assessment SET result = COALESCE(?1, result), score = COALESCE(?2, score), assessed_on = COALESCE(?3, assessed_on), notes = COALESCE(?4, notes), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.result)
    .bind(data.score)
    .bind(data.assessed_on)
    .bind(&data.notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Assessment {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Assessment {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM assessment WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete_by_member(pool: &SqlitePool, member_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM assessment WHERE member_id = ?")
        .bind(member_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
