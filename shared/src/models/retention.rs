//! Retention Model (挽留记录)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Retention record entity (退会挽留跟进)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RetentionRecord {
    pub id: i64,
    pub member_id: i64,
    /// "stayed" | "left" | "undecided"
    pub outcome: String,
    pub contacted_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create retention payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RetentionCreate {
    pub member_id: i64,
    #[validate(length(min = 1, max = 32))]
    pub outcome: String,
    pub contacted_on: NaiveDate,
    pub notes: Option<String>,
}

/// Update retention payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RetentionUpdate {
    #[validate(length(min = 1, max = 32))]
    pub outcome: Option<String>,
    pub contacted_on: Option<NaiveDate>,
    pub notes: Option<String>,
}
