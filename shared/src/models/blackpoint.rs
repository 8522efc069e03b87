//! Black Point Model (黑点记录)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Black point entity (违纪扣分)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BlackPointRecord {
    pub id: i64,
    pub member_id: i64,
    pub points: i64,
    pub reason: String,
    pub recorded_on: NaiveDate,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create black point payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BlackPointCreate {
    pub member_id: i64,
    #[validate(range(min = 1, max = 100))]
    pub points: i64,
    #[validate(length(min = 1, max = 255))]
    pub reason: String,
    pub recorded_on: NaiveDate,
}

/// Update black point payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BlackPointUpdate {
    #[validate(range(min = 1, max = 100))]
    pub points: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub reason: Option<String>,
    pub recorded_on: Option<NaiveDate>,
}
