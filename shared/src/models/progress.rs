//! Progress Model (课程进度)

use serde::{Deserialize, Serialize};

/// 进度只允许这几档
pub const ALLOWED_PERCENTS: [i64; 6] = [0, 10, 20, 50, 75, 100];

/// 检查进度百分比是否合法
pub fn is_valid_percent(percent: i64) -> bool {
    ALLOWED_PERCENTS.contains(&percent)
}

/// Progress entry: one (member, course) completion percentage.
///
/// 首次赋值时隐式创建，更新即覆盖，成员存续期间不删除。
/// 没有记录的课程视为 0%。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProgressEntry {
    pub member_id: i64,
    pub course_id: i64,
    pub progress_percent: i64,
    pub updated_at: i64,
}

/// 进度 + 课程信息 (列表/学员端视图)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProgressWithCourse {
    pub member_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub progress_percent: i64,
    pub updated_at: i64,
}

/// 单条进度写入 (upsert)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpsert {
    pub member_id: i64,
    pub course_id: i64,
    pub progress_percent: i64,
}

/// 批量进度写入：一个成员、多门课程、一次事务
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressBatchRequest {
    pub member_id: i64,
    pub entries: Vec<ProgressBatchEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressBatchEntry {
    pub course_id: i64,
    pub progress_percent: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_whitelist() {
        for p in ALLOWED_PERCENTS {
            assert!(is_valid_percent(p));
        }
        assert!(!is_valid_percent(30));
        assert!(!is_valid_percent(-10));
        assert!(!is_valid_percent(101));
    }
}
