//! Reminder Model (催训提醒)

use serde::{Deserialize, Serialize};

/// 物化的提醒列表条目
///
/// 由显式 "刷新列表" 动作重建；`GET /api/reminders` 返回的是实时计算值，
/// 这张表只是上次刷新时的快照。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReminderItem {
    pub member_id: i64,
    pub days_without_training: i64,
    pub days_until_timeout: i64,
    pub refreshed_at: i64,
}

/// 实时计算的提醒视图 (带成员信息)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderView {
    pub member_id: i64,
    pub nickname: String,
    pub qq: String,
    pub last_training_date: Option<chrono::NaiveDate>,
    /// 距上次训练天数；从未训练时为 i64::MAX
    pub days_without_training: i64,
    /// 负数 = 已超期, 0 = 今天到期, 正数 = 剩余天数
    pub days_until_timeout: i64,
    pub effective_timeout_days: i64,
}

/// 设置 / 清除成员的个人催训阈值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderTimeoutUpdate {
    /// None 表示清除覆盖，回退到全局设置
    pub reminder_timeout_days: Option<i64>,
}
