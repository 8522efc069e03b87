//! Course Model (训练课程)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Course entity
///
/// `code` 形如 `"2.3"`：整数前缀是训练阶段 (part)，后缀是该阶段内的序号。
/// 拖拽排序后由服务端重算，保证每个阶段内连续。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub category: String,
    pub difficulty: Option<String>,
    pub hours: Option<f64>,
    pub sort_order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Course {
    /// 课程所属阶段：`code` 的整数前缀 (`"2.3"` → 2)
    ///
    /// 无法解析的 code 返回 None (数据录入错误, 同步时跳过该课程)
    pub fn part(&self) -> Option<u32> {
        part_of_code(&self.code)
    }
}

/// Parse the part prefix out of a course code.
pub fn part_of_code(code: &str) -> Option<u32> {
    code.split('.').next()?.parse().ok()
}

/// Create course payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CourseCreate {
    #[validate(length(min = 1, max = 16))]
    pub code: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub category: String,
    pub difficulty: Option<String>,
    pub hours: Option<f64>,
}

/// Update course payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CourseUpdate {
    #[validate(length(min = 1, max = 16))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub hours: Option<f64>,
}

/// 课程重排请求：某一阶段内的新顺序 (课程 id 列表)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseReorderRequest {
    pub part: u32,
    pub ordered_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_prefix_parses() {
        assert_eq!(part_of_code("1.1"), Some(1));
        assert_eq!(part_of_code("4.12"), Some(4));
        assert_eq!(part_of_code("x.1"), None);
        assert_eq!(part_of_code(""), None);
    }
}
