//! Settings Repository (key-value + 视图偏好)

use super::RepoResult;
use shared::models::{DEFAULT_REMINDER_TIMEOUT_DAYS, GlobalSettings, ViewPreference};
use sqlx::SqlitePool;

const KEY_REMINDER_TIMEOUT: &str = "reminder_timeout_days";

pub async fn get(pool: &SqlitePool, key: &str) -> RepoResult<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM setting WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v))
}

pub async fn set(pool: &SqlitePool, key: &str, value: &str) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO setting (key, value, updated_at) VALUES (?1, ?2, ?3) ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// 全局设置视图；缺失的键用默认值
pub async fn global_settings(pool: &SqlitePool) -> RepoResult<GlobalSettings> {
    let timeout = get(pool, KEY_REMINDER_TIMEOUT)
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REMINDER_TIMEOUT_DAYS);
    Ok(GlobalSettings {
        reminder_timeout_days: timeout,
    })
}

pub async fn set_global_settings(pool: &SqlitePool, settings: &GlobalSettings) -> RepoResult<()> {
    set(
        pool,
        KEY_REMINDER_TIMEOUT,
        &settings.reminder_timeout_days.to_string(),
    )
    .await
}

// ========== View preferences (per admin, per view) ==========

pub async fn view_preference(
    pool: &SqlitePool,
    admin_id: i64,
    view_key: &str,
) -> RepoResult<Option<ViewPreference>> {
    let row = sqlx::query_as::<_, ViewPreference>(
        "SELECT admin_id, view_key, config, updated_at FROM view_preference WHERE admin_id = ? AND view_key = ?",
    )
    .bind(admin_id)
    .bind(view_key)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn set_view_preference(
    pool: &SqlitePool,
    admin_id: i64,
    view_key: &str,
    config: &serde_json::Value,
) -> RepoResult<ViewPreference> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO view_preference (admin_id, view_key, config, updated_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(admin_id, view_key) DO UPDATE SET config = excluded.config, updated_at = excluded.updated_at",
    )
    .bind(admin_id)
    .bind(view_key)
    .bind(config)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(ViewPreference {
        admin_id,
        view_key: view_key.to_string(),
        config: config.clone(),
        updated_at: now,
    })
}
