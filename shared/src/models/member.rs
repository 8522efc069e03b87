//! Member Model (成员)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 训练阶段 / 角色
///
/// Ordered: the derived `Ord` follows the training ladder, so
/// `stage >= StageRole::FullMember` is the staff-level check used by the
/// stage synchronizer.
///
/// | 值 | 说明 |
/// |----|------|
/// | untrained | 未开始训练 |
/// | early_training | 初训中 (动过课程但第一阶段未满) |
/// | part1_complete .. part3_complete | 对应阶段全部 100% |
/// | pre_exam | 考核预备 (手动设置的晋升前阶段) |
/// | full_member / elite / officer / leader | 正式成员及以上 (管理阶层) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum StageRole {
    Untrained,
    EarlyTraining,
    Part1Complete,
    Part2Complete,
    Part3Complete,
    PreExam,
    FullMember,
    Elite,
    Officer,
    Leader,
}

impl StageRole {
    /// 管理阶层 (正式成员及以上)：阶段同步永远不触碰
    pub fn is_staff_level(&self) -> bool {
        *self >= StageRole::FullMember
    }
}

/// 成员状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum MemberStatus {
    Normal,
    OnLeave,
    Quit,
    Other,
}

/// Member entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub nickname: String,
    pub qq: String,
    pub stage_role: StageRole,
    pub status: MemberStatus,
    pub last_training_date: Option<NaiveDate>,
    pub join_date: Option<NaiveDate>,
    /// 个人催训阈值覆盖 (天)，为空时使用全局设置
    pub reminder_timeout_days: Option<i64>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create member payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MemberCreate {
    #[validate(length(min = 1, max = 64))]
    pub nickname: String,
    #[validate(length(min = 5, max = 16))]
    pub qq: String,
    pub stage_role: Option<StageRole>,
    pub status: Option<MemberStatus>,
    pub last_training_date: Option<NaiveDate>,
    pub join_date: Option<NaiveDate>,
    pub reminder_timeout_days: Option<i64>,
    pub notes: Option<String>,
}

/// Update member payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MemberUpdate {
    #[validate(length(min = 1, max = 64))]
    pub nickname: Option<String>,
    #[validate(length(min = 5, max = 16))]
    pub qq: Option<String>,
    pub stage_role: Option<StageRole>,
    pub status: Option<MemberStatus>,
    pub last_training_date: Option<NaiveDate>,
    pub join_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// 批量成员操作 (一次事务, 服务端执行)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum MemberBatchOp {
    SetStatus { status: MemberStatus },
    SetStage { stage_role: StageRole },
    SetLastTrainingDate { date: NaiveDate },
    Deactivate,
}

/// 批量成员请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberBatchRequest {
    pub member_ids: Vec<i64>,
    #[serde(flatten)]
    pub op: MemberBatchOp,
}

/// 批量操作的单条结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub id: i64,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemResult {
    pub fn ok(id: i64) -> Self {
        Self {
            id,
            ok: true,
            error: None,
        }
    }

    pub fn failed(id: i64, error: impl Into<String>) -> Self {
        Self {
            id,
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// 阶段同步请求 (member_ids 为空 = 全部非管理成员)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageSyncRequest {
    pub member_ids: Option<Vec<i64>>,
}

/// 阶段同步结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSyncResponse {
    /// 实际被调整的成员
    pub changed: Vec<i64>,
    /// 考核预备但课程未满的成员 (仅提示，不改动)
    pub warnings: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ladder_is_ordered() {
        assert!(StageRole::Untrained < StageRole::EarlyTraining);
        assert!(StageRole::Part3Complete < StageRole::PreExam);
        assert!(StageRole::PreExam < StageRole::FullMember);
        assert!(StageRole::Elite < StageRole::Leader);
    }

    #[test]
    fn staff_level_starts_at_full_member() {
        assert!(!StageRole::PreExam.is_staff_level());
        assert!(StageRole::FullMember.is_staff_level());
        assert!(StageRole::Officer.is_staff_level());
    }

    #[test]
    fn stage_role_serializes_snake_case() {
        let s = serde_json::to_string(&StageRole::Part1Complete).unwrap();
        assert_eq!(s, "\"part1_complete\"");
    }
}
