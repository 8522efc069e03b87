//! 催训计算 (Reminder Calculator)
//!
//! 纯函数：给定日期和阈值算出超期状态，不产生任何副作用。
//! 物化提醒列表的持久化在 api/reminders 的 refresh 动作里。

use chrono::NaiveDate;

/// 距上次训练的整天数
///
/// 从未训练 (`None`) 视为永远超期，返回 `i64::MAX`。
pub fn days_without_training(last_training_date: Option<NaiveDate>, today: NaiveDate) -> i64 {
    match last_training_date {
        Some(last) => (today - last).num_days(),
        None => i64::MAX,
    }
}

/// 生效阈值：个人覆盖优先，否则用全局设置
pub fn effective_timeout(override_days: Option<i64>, global_days: i64) -> i64 {
    override_days.unwrap_or(global_days)
}

/// 距超期还剩几天
///
/// 负数 = 已超期 n 天, 0 = 今天到期, 正数 = 剩余天数。
/// saturating: 从未训练 (MAX 天) 时结果钉在 i64::MIN，始终为负。
pub fn days_until_timeout(days_without: i64, timeout_days: i64) -> i64 {
    timeout_days.saturating_sub(days_without)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overdue_by_three_days() {
        // last = today - 10, timeout = 7 → -3
        let today = date(2024, 6, 20);
        let last = date(2024, 6, 10);
        let days = days_without_training(Some(last), today);
        assert_eq!(days, 10);
        assert_eq!(days_until_timeout(days, 7), -3);
    }

    #[test]
    fn due_today() {
        let today = date(2024, 6, 20);
        let last = date(2024, 6, 13);
        assert_eq!(days_until_timeout(days_without_training(Some(last), today), 7), 0);
    }

    #[test]
    fn days_remaining() {
        let today = date(2024, 6, 20);
        let last = date(2024, 6, 18);
        assert_eq!(days_until_timeout(days_without_training(Some(last), today), 7), 5);
    }

    #[test]
    fn never_trained_is_always_overdue() {
        let today = date(2024, 6, 20);
        let days = days_without_training(None, today);
        assert_eq!(days, i64::MAX);
        // 任意阈值都为负
        assert!(days_until_timeout(days, 7) < 0);
        assert!(days_until_timeout(days, 10_000) < 0);
    }

    #[test]
    fn member_override_wins_over_global() {
        assert_eq!(effective_timeout(Some(3), 7), 3);
        assert_eq!(effective_timeout(None, 7), 7);
    }
}
