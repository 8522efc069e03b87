//! Member Handlers
//!
//! 成员 CRUD + 阶段同步 + 批量操作。
//! 批量端点 (sync-stage / batch) 在单个事务内执行，结果逐条返回。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::hash_password;
use crate::core::ServerState;
use crate::db::repository::{course as course_repo, member as member_repo, progress as progress_repo};
use crate::training::{CatalogParts, plan_sync};
use crate::utils::{AppError, AppResult};
use shared::models::{
    BatchItemResult, Member, MemberBatchOp, MemberBatchRequest, MemberCreate, MemberUpdate,
    ProgressWithCourse, ReminderTimeoutUpdate, StageSyncRequest, StageSyncResponse,
};

/// GET /api/members - 全部活跃成员
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Member>>> {
    let members = member_repo::find_all(&state.pool).await?;
    Ok(Json(members))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/members/search?q= - 按昵称/QQ 模糊搜索
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Member>>> {
    let members = member_repo::search(&state.pool, &query.q).await?;
    Ok(Json(members))
}

/// 成员详情 (含课程进度)
#[derive(Debug, serde::Serialize)]
pub struct MemberDetail {
    #[serde(flatten)]
    pub member: Member,
    pub progress: Vec<ProgressWithCourse>,
}

/// GET /api/members/{id} - 成员详情 + 进度
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MemberDetail>> {
    let member = member_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("成员 {id} 不存在")))?;
    let progress = progress_repo::find_details_by_member(&state.pool, id).await?;
    Ok(Json(MemberDetail { member, progress }))
}

/// POST /api/members - 新建成员
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<MemberCreate>,
) -> AppResult<Json<Member>> {
    req.validate()?;
    let member = member_repo::create(&state.pool, req).await?;
    tracing::info!(member_id = %member.id, nickname = %member.nickname, "Member created");
    Ok(Json(member))
}

/// PUT /api/members/{id} - 更新成员 (缺席字段不变)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<MemberUpdate>,
) -> AppResult<Json<Member>> {
    req.validate()?;
    let member = member_repo::update(&state.pool, id, req).await?;
    Ok(Json(member))
}

/// DELETE /api/members/{id} - 停用成员 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    let removed = member_repo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("成员 {id} 不存在")));
    }
    tracing::info!(member_id = %id, "Member deactivated");
    Ok(Json(()))
}

/// PUT /api/members/{id}/reminder-timeout - 个人催训阈值 (null = 回退全局)
pub async fn set_reminder_timeout(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<ReminderTimeoutUpdate>,
) -> AppResult<Json<Member>> {
    if let Some(days) = req.reminder_timeout_days
        && days < 1
    {
        return Err(AppError::validation("催训阈值必须至少为 1 天"));
    }
    let member = member_repo::set_reminder_timeout(&state.pool, id, req.reminder_timeout_days).await?;
    Ok(Json(member))
}

#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}

/// PUT /api/members/{id}/password - 管理员代设学员端口令
pub async fn set_password(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<SetPasswordRequest>,
) -> AppResult<Json<()>> {
    if req.password.len() < 6 {
        return Err(AppError::validation("口令长度至少 6 位"));
    }
    let hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    member_repo::set_password_hash(&state.pool, id, &hash).await?;
    tracing::info!(member_id = %id, "Student password set");
    Ok(Json(()))
}

/// POST /api/members/sync-stage - 阶段同步
///
/// 读取课程目录和全量进度，对目标成员计算应处阶段，
/// 所有变更在一个事务里写回。管理阶层永不触碰；
/// pre_exam 课程未满只进 warnings。
pub async fn sync_stage(
    State(state): State<ServerState>,
    Json(req): Json<StageSyncRequest>,
) -> AppResult<Json<StageSyncResponse>> {
    let members =
        member_repo::find_sync_targets(&state.pool, req.member_ids.as_deref()).await?;
    let courses = course_repo::find_all(&state.pool).await?;
    let parts = CatalogParts::from_courses(&courses);
    let progress = progress_repo::progress_by_member(&state.pool).await?;

    let plan = plan_sync(&members, &parts, &progress);

    let mut tx = state.pool.begin().await?;
    for (member_id, stage) in &plan.changed {
        member_repo::set_stage_tx(&mut *tx, *member_id, *stage).await?;
    }
    tx.commit().await?;

    tracing::info!(
        changed = plan.changed.len(),
        warnings = plan.warnings.len(),
        "Stage sync applied"
    );

    Ok(Json(StageSyncResponse {
        changed: plan.changed.iter().map(|(id, _)| *id).collect(),
        warnings: plan.warnings,
    }))
}

/// POST /api/members/batch - 批量成员操作 (单事务)
///
/// 同一操作应用到一批成员。单条失败 (如成员不存在) 记入结果但不回滚
/// 其余成员的变更。
pub async fn batch(
    State(state): State<ServerState>,
    Json(req): Json<MemberBatchRequest>,
) -> AppResult<Json<Vec<BatchItemResult>>> {
    if req.member_ids.is_empty() {
        return Err(AppError::validation("member_ids 不能为空"));
    }

    let mut tx = state.pool.begin().await?;
    let mut results = Vec::with_capacity(req.member_ids.len());

    for id in &req.member_ids {
        let applied = match &req.op {
            MemberBatchOp::SetStatus { status } => {
                member_repo::set_status_tx(&mut *tx, *id, *status).await?
            }
            MemberBatchOp::SetStage { stage_role } => {
                member_repo::set_stage_tx(&mut *tx, *id, *stage_role).await?;
                true
            }
            MemberBatchOp::SetLastTrainingDate { date } => {
                member_repo::set_last_training_date_tx(&mut *tx, *id, *date).await?
            }
            MemberBatchOp::Deactivate => member_repo::deactivate_tx(&mut *tx, *id).await?,
        };
        results.push(if applied {
            BatchItemResult::ok(*id)
        } else {
            BatchItemResult::failed(*id, "成员不存在或已停用")
        });
    }

    tx.commit().await?;
    Ok(Json(results))
}
