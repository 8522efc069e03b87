//! Settings Model (全局设置与视图偏好)

use serde::{Deserialize, Serialize};

/// 全局催训阈值的默认值 (天)
pub const DEFAULT_REMINDER_TIMEOUT_DAYS: i64 = 7;

/// Key-value setting row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

/// 全局设置 (API 视图)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub reminder_timeout_days: i64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            reminder_timeout_days: DEFAULT_REMINDER_TIMEOUT_DAYS,
        }
    }
}

/// 每个管理端视图的显式筛选/排序/搜索配置
///
/// 源系统把这些状态散落在浏览器存储里；这里改为显式对象，按
/// (admin, view_key) 存储，刷新后恢复。config 是前端自定义的 JSON。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ViewPreference {
    pub admin_id: i64,
    pub view_key: String,
    pub config: serde_json::Value,
    pub updated_at: i64,
}

/// 写入视图偏好
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewPreferenceUpdate {
    pub config: serde_json::Value,
}
