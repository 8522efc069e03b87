//! Progress Repository
//!
//! (member, course) 的完成度。没有记录 = 0%，缺行统一在
//! 阶段同步的查表函数里补 0，不在调用点散落 null 合并。

use super::RepoResult;
use shared::models::{ProgressEntry, ProgressWithCourse};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

pub async fn find_by_member(pool: &SqlitePool, member_id: i64) -> RepoResult<Vec<ProgressEntry>> {
    let rows = sqlx::query_as::<_, ProgressEntry>(
        "SELECT member_id, course_id, progress_percent, updated_at FROM progress WHERE member_id = ?",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// 成员进度 + 课程信息，按课程排序 (学员端/详情页)
pub async fn find_details_by_member(
    pool: &SqlitePool,
    member_id: i64,
) -> RepoResult<Vec<ProgressWithCourse>> {
    let rows = sqlx::query_as::<_, ProgressWithCourse>(
        "SELECT p.member_id, p.course_id, c.code as course_code, c.name as course_name, p.progress_percent, p.updated_at FROM progress p JOIN course c ON p.course_id = c.id WHERE p.member_id = ? ORDER BY c.sort_order ASC",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// 全量进度表 (阶段同步用): member_id -> course_id -> percent
pub async fn progress_by_member(
    pool: &SqlitePool,
) -> RepoResult<HashMap<i64, HashMap<i64, i64>>> {
    let rows: Vec<(i64, i64, i64)> =
        sqlx::query_as("SELECT member_id, course_id, progress_percent FROM progress")
            .fetch_all(pool)
            .await?;
    let mut map: HashMap<i64, HashMap<i64, i64>> = HashMap::new();
    for (member_id, course_id, percent) in rows {
        map.entry(member_id).or_default().insert(course_id, percent);
    }
    Ok(map)
}

pub async fn upsert(
    pool: &SqlitePool,
    member_id: i64,
    course_id: i64,
    percent: i64,
) -> RepoResult<ProgressEntry> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO progress (member_id, course_id, progress_percent, updated_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(member_id, course_id) DO UPDATE SET progress_percent = excluded.progress_percent, updated_at = excluded.updated_at",
    )
    .bind(member_id)
    .bind(course_id)
    .bind(percent)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(ProgressEntry {
        member_id,
        course_id,
        progress_percent: percent,
        updated_at: now,
    })
}

/// 批量 upsert (事务内, 一个成员多门课程)
pub async fn upsert_tx(
    conn: &mut SqliteConnection,
    member_id: i64,
    course_id: i64,
    percent: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO progress (member_id, course_id, progress_percent, updated_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(member_id, course_id) DO UPDATE SET progress_percent = excluded.progress_percent, updated_at = excluded.updated_at",
    )
    .bind(member_id)
    .bind(course_id)
    .bind(percent)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// 退会批准时清理成员进度 (事务外, 逐步执行的一环)
pub async fn delete_by_member(pool: &SqlitePool, member_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM progress WHERE member_id = ?")
        .bind(member_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
