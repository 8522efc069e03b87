//! Leave Handlers
//!
//! 批准请假会顺带把成员状态置为 on_leave；驳回不动成员。

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{leave as leave_repo, member as member_repo};
use crate::utils::{AppError, AppResult};
use shared::models::{LeaveCreate, LeaveRecord, LeaveStatus, LeaveUpdate, MemberStatus};

/// GET /api/leaves - 全部请假记录
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<LeaveRecord>>> {
    let rows = leave_repo::find_all(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /api/leaves/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LeaveRecord>> {
    let row = leave_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("请假记录 {id} 不存在")))?;
    Ok(Json(row))
}

/// POST /api/leaves - 新建请假 (初始 pending)
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<LeaveCreate>,
) -> AppResult<Json<LeaveRecord>> {
    req.validate()?;
    if let Some(end) = req.end_date
        && end < req.start_date
    {
        return Err(AppError::validation("结束日期不能早于开始日期"));
    }
    let row = leave_repo::create(&state.pool, req).await?;
    Ok(Json(row))
}

/// PUT /api/leaves/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<LeaveUpdate>,
) -> AppResult<Json<LeaveRecord>> {
    req.validate()?;
    let row = leave_repo::update(&state.pool, id, req).await?;
    Ok(Json(row))
}

/// POST /api/leaves/{id}/approve - 批准请假，成员状态置 on_leave
pub async fn approve(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LeaveRecord>> {
    let existing = leave_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("请假记录 {id} 不存在")))?;
    if existing.status != LeaveStatus::Pending {
        return Err(AppError::conflict("请假记录已处理过"));
    }

    let row = leave_repo::set_status(&state.pool, id, LeaveStatus::Approved).await?;

    let mut tx = state.pool.begin().await?;
    member_repo::set_status_tx(&mut *tx, row.member_id, MemberStatus::OnLeave).await?;
    tx.commit().await?;

    tracing::info!(leave_id = %id, member_id = %row.member_id, "Leave approved");
    Ok(Json(row))
}

/// POST /api/leaves/{id}/reject - 驳回请假
pub async fn reject(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LeaveRecord>> {
    let existing = leave_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("请假记录 {id} 不存在")))?;
    if existing.status != LeaveStatus::Pending {
        return Err(AppError::conflict("请假记录已处理过"));
    }

    let row = leave_repo::set_status(&state.pool, id, LeaveStatus::Rejected).await?;
    tracing::info!(leave_id = %id, "Leave rejected");
    Ok(Json(row))
}

/// DELETE /api/leaves/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    let removed = leave_repo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("请假记录 {id} 不存在")));
    }
    Ok(Json(()))
}
