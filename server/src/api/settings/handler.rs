//! Settings Handlers
//!
//! 视图偏好按 (当前管理员, view_key) 存储：筛选/排序/搜索是显式
//! 保存的服务端状态，换浏览器也能恢复。

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::settings as settings_repo;
use crate::utils::{AppError, AppResult};
use shared::models::{GlobalSettings, ViewPreference, ViewPreferenceUpdate};

/// GET /api/settings - 全局设置
pub async fn get_global(State(state): State<ServerState>) -> AppResult<Json<GlobalSettings>> {
    let settings = settings_repo::global_settings(&state.pool).await?;
    Ok(Json(settings))
}

/// PUT /api/settings - 更新全局设置
pub async fn put_global(
    State(state): State<ServerState>,
    Json(req): Json<GlobalSettings>,
) -> AppResult<Json<GlobalSettings>> {
    if req.reminder_timeout_days < 1 {
        return Err(AppError::validation("催训阈值必须至少为 1 天"));
    }
    settings_repo::set_global_settings(&state.pool, &req).await?;
    tracing::info!(
        reminder_timeout_days = req.reminder_timeout_days,
        "Global settings updated"
    );
    Ok(Json(req))
}

/// GET /api/settings/views/{view_key} - 当前管理员的视图偏好
///
/// 没存过时返回空配置 (前端用默认视图)。
pub async fn get_view(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(view_key): Path<String>,
) -> AppResult<Json<ViewPreference>> {
    let pref = settings_repo::view_preference(&state.pool, user.id, &view_key)
        .await?
        .unwrap_or(ViewPreference {
            admin_id: user.id,
            view_key,
            config: serde_json::Value::Object(serde_json::Map::new()),
            updated_at: 0,
        });
    Ok(Json(pref))
}

/// PUT /api/settings/views/{view_key} - 保存视图偏好
pub async fn put_view(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(view_key): Path<String>,
    Json(req): Json<ViewPreferenceUpdate>,
) -> AppResult<Json<ViewPreference>> {
    if view_key.is_empty() || view_key.len() > 64 {
        return Err(AppError::validation("view_key 长度必须在 1-64 之间"));
    }
    let pref =
        settings_repo::set_view_preference(&state.pool, user.id, &view_key, &req.config).await?;
    Ok(Json(pref))
}
