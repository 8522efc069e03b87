//! Member Repository

use super::{RepoError, RepoResult};
use shared::models::{Member, MemberCreate, MemberStatus, MemberUpdate, StageRole};
use sqlx::{SqliteConnection, SqlitePool};

const MEMBER_SELECT: &str = "SELECT id, nickname, qq, stage_role, status, last_training_date, join_date, reminder_timeout_days, notes, is_active, created_at, updated_at FROM member";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE is_active = 1 ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Member>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_qq(pool: &SqlitePool, qq: &str) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE qq = ? AND is_active = 1");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(qq)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Member>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{MEMBER_SELECT} WHERE is_active = 1 AND (nickname LIKE ?1 OR qq LIKE ?1) ORDER BY created_at DESC"
    );
    let rows = sqlx::query_as::<_, Member>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// 阶段同步的目标成员：活跃 + 可选 id 子集 (管理阶层的排除在同步逻辑里做)
pub async fn find_sync_targets(
    pool: &SqlitePool,
    member_ids: Option<&[i64]>,
) -> RepoResult<Vec<Member>> {
    match member_ids {
        None => find_all(pool).await,
        Some(ids) if ids.is_empty() => Ok(Vec::new()),
        Some(ids) => {
            let placeholders = vec!["?"; ids.len()].join(", ");
            let sql = format!("{MEMBER_SELECT} WHERE is_active = 1 AND id IN ({placeholders})");
            let mut query = sqlx::query_as::<_, Member>(&sql);
            for id in ids {
                query = query.bind(id);
            }
            Ok(query.fetch_all(pool).await?)
        }
    }
}

pub async fn create(pool: &SqlitePool, data: MemberCreate) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let stage_role = data.stage_role.unwrap_or(StageRole::Untrained);
    let status = data.status.unwrap_or(MemberStatus::Normal);
    sqlx::query(
        "INSERT INTO member (id, nickname, qq, stage_role, status, last_training_date, join_date, reminder_timeout_days, notes, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1, ?10, ?10)",
    )
    .bind(id)
    .bind(&data.nickname)
    .bind(&data.qq)
    .bind(stage_role)
    .bind(status)
    .bind(data.last_training_date)
    .bind(data.join_date)
    .bind(data.reminder_timeout_days)
    .bind(&data.notes)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MemberUpdate) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member SET nickname = COALESCE(?1, nickname), qq = COALESCE(?2, qq), stage_role = COALESCE(?3, stage_role), status = COALESCE(?4, status), last_training_date = COALESCE(?5, last_training_date), join_date = COALESCE(?6, join_date), notes = COALESCE(?7, notes), is_active = COALESCE(?8, is_active), updated_at = ?9 WHERE id = ?10",
    )
    .bind(&data.nickname)
    .bind(&data.qq)
    .bind(data.stage_role)
    .bind(data.status)
    .bind(data.last_training_date)
    .bind(data.join_date)
    .bind(&data.notes)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE member SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// 设置/清除个人催训阈值 (None = 回退全局设置)
pub async fn set_reminder_timeout(
    pool: &SqlitePool,
    id: i64,
    days: Option<i64>,
) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member SET reminder_timeout_days = ?1, updated_at = ?2 WHERE id = ?3 AND is_active = 1",
    )
    .bind(days)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))
}

/// 学员口令 (argon2 hash 由调用方生成)
pub async fn set_password_hash(pool: &SqlitePool, id: i64, hash: &str) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE member SET password_hash = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(hash)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    Ok(())
}

pub async fn password_hash(pool: &SqlitePool, id: i64) -> RepoResult<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT password_hash FROM member WHERE id = ? AND is_active = 1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.and_then(|(h,)| h))
}

// ========== Transaction variants (bulk endpoints) ==========

/// 同步后的阶段写回 (事务内)
pub async fn set_stage_tx(
    conn: &mut SqliteConnection,
    id: i64,
    stage: StageRole,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE member SET stage_role = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(stage)
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn set_status_tx(
    conn: &mut SqliteConnection,
    id: i64,
    status: MemberStatus,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member SET status = ?1, updated_at = ?2 WHERE id = ?3 AND is_active = 1",
    )
    .bind(status)
    .bind(now)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn set_last_training_date_tx(
    conn: &mut SqliteConnection,
    id: i64,
    date: chrono::NaiveDate,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member SET last_training_date = ?1, updated_at = ?2 WHERE id = ?3 AND is_active = 1",
    )
    .bind(date)
    .bind(now)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn deactivate_tx(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE member SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
