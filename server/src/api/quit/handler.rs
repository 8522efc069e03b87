//! Quit Request Handlers
//!
//! 审批是一串独立步骤：改申请状态、改成员状态、清理各关联表、
//! 停用成员。逐步执行、逐条上报，后面的步骤失败不回滚前面的
//! (前端按步骤列表展示，管理员手工补救)。

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{
    assessment as assessment_repo, blackpoint as blackpoint_repo, leave as leave_repo,
    member as member_repo, progress as progress_repo, quit as quit_repo,
    reminder as reminder_repo,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    MemberStatus, QuitApproveResponse, QuitCreate, QuitRequest, QuitStatus, QuitStepResult,
};

/// GET /api/quit - 全部退会申请
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<QuitRequest>>> {
    let rows = quit_repo::find_all(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /api/quit/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<QuitRequest>> {
    let row = quit_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("退会申请 {id} 不存在")))?;
    Ok(Json(row))
}

/// POST /api/quit - 新建退会申请 (初始 pending)
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<QuitCreate>,
) -> AppResult<Json<QuitRequest>> {
    req.validate()?;
    member_repo::find_by_id(&state.pool, req.member_id)
        .await?
        .filter(|m| m.is_active)
        .ok_or_else(|| AppError::not_found(format!("成员 {} 不存在", req.member_id)))?;
    let row = quit_repo::create(&state.pool, req).await?;
    Ok(Json(row))
}

/// POST /api/quit/{id}/approve - 批准退会
///
/// 第一步 (申请置 approved) 失败时整体报错；之后的清理步骤
/// 各自执行，结果逐条返回。
pub async fn approve(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<QuitApproveResponse>> {
    // 门禁步骤：pending 之外的申请直接拒绝
    let request = quit_repo::resolve(&state.pool, id, QuitStatus::Approved).await?;
    let member_id = request.member_id;

    let mut steps = vec![QuitStepResult::ok("resolve_request")];

    // 成员状态 → quit
    steps.push(
        match set_member_status(&state, member_id, MemberStatus::Quit).await {
            Ok(true) => QuitStepResult::ok("set_member_status"),
            Ok(false) => QuitStepResult::failed("set_member_status", "成员不存在或已停用"),
            Err(e) => QuitStepResult::failed("set_member_status", e.to_string()),
        },
    );

    // 关联数据清理
    steps.push(step("delete_progress", progress_repo::delete_by_member(&state.pool, member_id).await));
    steps.push(step("delete_assessments", assessment_repo::delete_by_member(&state.pool, member_id).await));
    steps.push(step("delete_leaves", leave_repo::delete_by_member(&state.pool, member_id).await));
    steps.push(step("delete_blackpoints", blackpoint_repo::delete_by_member(&state.pool, member_id).await));
    steps.push(step("delete_reminder", reminder_repo::delete_by_member(&state.pool, member_id).await));

    // 最后停用成员
    steps.push(match deactivate_member(&state, member_id).await {
        Ok(_) => QuitStepResult::ok("deactivate_member"),
        Err(e) => QuitStepResult::failed("deactivate_member", e.to_string()),
    });

    let failed = steps.iter().filter(|s| !s.ok).count();
    if failed > 0 {
        tracing::warn!(quit_id = %id, member_id = %member_id, failed, "Quit approved with failed steps");
    } else {
        tracing::info!(quit_id = %id, member_id = %member_id, "Quit approved");
    }

    Ok(Json(QuitApproveResponse {
        quit_id: id,
        member_id,
        steps,
    }))
}

/// POST /api/quit/{id}/reject - 驳回退会申请
pub async fn reject(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<QuitRequest>> {
    let row = quit_repo::resolve(&state.pool, id, QuitStatus::Rejected).await?;
    tracing::info!(quit_id = %id, "Quit rejected");
    Ok(Json(row))
}

/// DELETE /api/quit/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    let removed = quit_repo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("退会申请 {id} 不存在")));
    }
    Ok(Json(()))
}

fn step(name: &str, result: crate::db::repository::RepoResult<u64>) -> QuitStepResult {
    match result {
        Ok(_) => QuitStepResult::ok(name),
        Err(e) => QuitStepResult::failed(name, e.to_string()),
    }
}

async fn set_member_status(
    state: &ServerState,
    member_id: i64,
    status: MemberStatus,
) -> AppResult<bool> {
    let mut conn = state.pool.acquire().await?;
    Ok(member_repo::set_status_tx(&mut *conn, member_id, status).await?)
}

async fn deactivate_member(state: &ServerState, member_id: i64) -> AppResult<bool> {
    let mut conn = state.pool.acquire().await?;
    Ok(member_repo::deactivate_tx(&mut *conn, member_id).await?)
}
