//! Progress Handlers
//!
//! 进度档位只有 {0, 10, 20, 50, 75, 100}，任何其他值整个请求拒绝。
//! 批量写入一个成员多门课程，单事务提交。

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{course as course_repo, member as member_repo, progress as progress_repo};
use crate::utils::{AppError, AppResult};
use shared::models::{
    ProgressBatchRequest, ProgressEntry, ProgressUpsert, ProgressWithCourse, is_valid_percent,
};

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub member_id: i64,
}

/// GET /api/progress?member_id= - 某成员的全部进度 (带课程信息)
pub async fn list_by_member(
    State(state): State<ServerState>,
    Query(query): Query<ProgressQuery>,
) -> AppResult<Json<Vec<ProgressWithCourse>>> {
    let rows = progress_repo::find_details_by_member(&state.pool, query.member_id).await?;
    Ok(Json(rows))
}

/// PUT /api/progress - 单条进度写入 (upsert)
pub async fn upsert(
    State(state): State<ServerState>,
    Json(req): Json<ProgressUpsert>,
) -> AppResult<Json<ProgressEntry>> {
    if !is_valid_percent(req.progress_percent) {
        return Err(AppError::validation(format!(
            "进度 {} 不在允许档位内 (0/10/20/50/75/100)",
            req.progress_percent
        )));
    }
    ensure_member_exists(&state, req.member_id).await?;
    ensure_course_exists(&state, req.course_id).await?;

    let entry = progress_repo::upsert(
        &state.pool,
        req.member_id,
        req.course_id,
        req.progress_percent,
    )
    .await?;
    Ok(Json(entry))
}

/// POST /api/progress/batch - 批量进度写入 (一个成员, 单事务)
///
/// 任何一条百分比非法或课程不存在时，整个请求拒绝，什么都不写。
pub async fn batch(
    State(state): State<ServerState>,
    Json(req): Json<ProgressBatchRequest>,
) -> AppResult<Json<Vec<ProgressWithCourse>>> {
    if req.entries.is_empty() {
        return Err(AppError::validation("entries 不能为空"));
    }
    for entry in &req.entries {
        if !is_valid_percent(entry.progress_percent) {
            return Err(AppError::validation(format!(
                "课程 {} 的进度 {} 不在允许档位内",
                entry.course_id, entry.progress_percent
            )));
        }
    }
    ensure_member_exists(&state, req.member_id).await?;
    for entry in &req.entries {
        ensure_course_exists(&state, entry.course_id).await?;
    }

    let mut tx = state.pool.begin().await?;
    for entry in &req.entries {
        progress_repo::upsert_tx(&mut *tx, req.member_id, entry.course_id, entry.progress_percent)
            .await?;
    }
    tx.commit().await?;

    tracing::info!(
        member_id = %req.member_id,
        count = req.entries.len(),
        "Progress batch applied"
    );

    let rows = progress_repo::find_details_by_member(&state.pool, req.member_id).await?;
    Ok(Json(rows))
}

async fn ensure_member_exists(state: &ServerState, member_id: i64) -> AppResult<()> {
    member_repo::find_by_id(&state.pool, member_id)
        .await?
        .filter(|m| m.is_active)
        .ok_or_else(|| AppError::not_found(format!("成员 {member_id} 不存在")))?;
    Ok(())
}

async fn ensure_course_exists(state: &ServerState, course_id: i64) -> AppResult<()> {
    course_repo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("课程 {course_id} 不存在")))?;
    Ok(())
}
