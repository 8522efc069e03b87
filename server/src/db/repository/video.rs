//! Video Repository (第三方托管视频的引用)

use super::{RepoError, RepoResult};
use shared::models::VideoRecord;
use sqlx::SqlitePool;

const VIDEO_SELECT: &str = "SELECT id, title, slug, url, course_id, created_at FROM video";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<VideoRecord>> {
    let sql = format!("{VIDEO_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, VideoRecord>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<VideoRecord>> {
    let sql = format!("{VIDEO_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, VideoRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    title: &str,
    slug: &str,
    url: &str,
    course_id: Option<i64>,
) -> RepoResult<VideoRecord> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO video (id, title, slug, url, course_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(title)
    .bind(slug)
    .bind(url)
    .bind(course_id)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Video {slug} already imported"))
        }
        other => other,
    })?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create video record".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM video WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
