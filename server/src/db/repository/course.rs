//! Course Repository

use super::{RepoError, RepoResult};
use shared::models::{Course, CourseCreate, CourseUpdate};
use sqlx::{SqliteConnection, SqlitePool};

const COURSE_SELECT: &str = "SELECT id, code, name, category, difficulty, hours, sort_order, created_at, updated_at FROM course";

/// 全部课程，按手动排序
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Course>> {
    let sql = format!("{COURSE_SELECT} ORDER BY sort_order ASC, code ASC");
    let rows = sqlx::query_as::<_, Course>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Course>> {
    let sql = format!("{COURSE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Course>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<Course>> {
    let sql = format!("{COURSE_SELECT} WHERE code = ?");
    let row = sqlx::query_as::<_, Course>(&sql)
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: CourseCreate) -> RepoResult<Course> {
    if find_by_code(pool, &data.code).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Course code {} already exists",
            data.code
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    // 追加到末尾
    let (max_order,): (Option<i64>,) = sqlx::query_as("SELECT MAX(sort_order) FROM course")
        .fetch_one(pool)
        .await?;
    sqlx::query(
        "INSERT INTO course (id, code, name, category, difficulty, hours, sort_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.code)
    .bind(&data.name)
    .bind(&data.category)
    .bind(&data.difficulty)
    .bind(data.hours)
    .bind(max_order.unwrap_or(0) + 1)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create course".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CourseUpdate) -> RepoResult<Course> {
    if let Some(code) = &data.code
        && let Some(existing) = find_by_code(pool, code).await?
        && existing.id != id
    {
        return Err(RepoError::Duplicate(format!(
            "Course code {code} already exists"
        )));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE course SET code = COALESCE(?1, code), name = COALESCE(?2, name), category = COALESCE(?3, category), difficulty = COALESCE(?4, difficulty), hours = COALESCE(?5, hours), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.code)
    .bind(&data.name)
    .bind(&data.category)
    .bind(&data.difficulty)
    .bind(data.hours)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Course {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Course {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM course WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// 重排写回 (事务内)：每门课程新的 code 和 sort_order
pub async fn apply_reorder_tx(
    conn: &mut SqliteConnection,
    renumbered: &[(i64, String, i64)],
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    // Two phases: codes are UNIQUE and swaps would collide mid-update,
    // so park every course on a temporary code first.
    for (id, _, _) in renumbered {
        let rows = sqlx::query("UPDATE course SET code = ?1 WHERE id = ?2")
            .bind(format!("tmp.{id}"))
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if rows.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Course {id} not found")));
        }
    }
    for (id, code, sort_order) in renumbered {
        let rows = sqlx::query(
            "UPDATE course SET code = ?1, sort_order = ?2, updated_at = ?3 WHERE id = ?4",
        )
        .bind(code)
        .bind(sort_order)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
        if rows.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Course {id} not found")));
        }
    }
    Ok(())
}
