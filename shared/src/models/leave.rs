//! Leave Model (请假记录)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 请假状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Leave record entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LeaveRecord {
    pub id: i64,
    pub member_id: i64,
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: LeaveStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create leave payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LeaveCreate {
    pub member_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Update leave payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LeaveUpdate {
    #[validate(length(min = 1, max = 255))]
    pub reason: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
