//! Quit Model (退会申请)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 退会申请状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum QuitStatus {
    Pending,
    Approved,
    Rejected,
}

/// Quit request entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct QuitRequest {
    pub id: i64,
    pub member_id: i64,
    pub reason: Option<String>,
    pub status: QuitStatus,
    pub requested_at: i64,
    pub resolved_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create quit request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuitCreate {
    pub member_id: i64,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

/// 审批结果：逐步执行、逐步上报，失败的步骤不回滚已成功的步骤
/// (源系统的既定行为，前端按步骤展示)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuitApproveResponse {
    pub quit_id: i64,
    pub member_id: i64,
    pub steps: Vec<QuitStepResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuitStepResult {
    pub step: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuitStepResult {
    pub fn ok(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            ok: true,
            error: None,
        }
    }

    pub fn failed(step: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            ok: false,
            error: Some(error.into()),
        }
    }
}
