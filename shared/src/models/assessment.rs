//! Assessment Model (考核记录)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Assessment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Assessment {
    pub id: i64,
    pub member_id: i64,
    pub course_id: Option<i64>,
    /// "pass" | "fail" | 自定义结论
    pub result: String,
    pub score: Option<i64>,
    pub assessed_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create assessment payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssessmentCreate {
    pub member_id: i64,
    pub course_id: Option<i64>,
    #[validate(length(min = 1, max = 32))]
    pub result: String,
    #[validate(range(min = 0, max = 100))]
    pub score: Option<i64>,
    pub assessed_on: NaiveDate,
    pub notes: Option<String>,
}

/// Update assessment payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssessmentUpdate {
    #[validate(length(min = 1, max = 32))]
    pub result: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub score: Option<i64>,
    pub assessed_on: Option<NaiveDate>,
    pub notes: Option<String>,
}
