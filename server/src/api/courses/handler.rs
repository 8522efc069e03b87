//! Course Handlers
//!
//! 课程 CRUD + 阶段内重排。重排请求必须是该阶段现有课程
//! id 的一个完整排列，否则整个请求拒绝。

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::course as course_repo;
use crate::training::renumber_part;
use crate::utils::{AppError, AppResult};
use shared::models::{Course, CourseCreate, CourseReorderRequest, CourseUpdate};

/// GET /api/courses - 全部课程 (手动排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Course>>> {
    let courses = course_repo::find_all(&state.pool).await?;
    Ok(Json(courses))
}

/// GET /api/courses/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Course>> {
    let course = course_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("课程 {id} 不存在")))?;
    Ok(Json(course))
}

/// POST /api/courses - 新建课程 (code 唯一, 追加到目录末尾)
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<CourseCreate>,
) -> AppResult<Json<Course>> {
    req.validate()?;
    let course = course_repo::create(&state.pool, req).await?;
    tracing::info!(course_id = %course.id, code = %course.code, "Course created");
    Ok(Json(course))
}

/// PUT /api/courses/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<CourseUpdate>,
) -> AppResult<Json<Course>> {
    req.validate()?;
    let course = course_repo::update(&state.pool, id, req).await?;
    Ok(Json(course))
}

/// DELETE /api/courses/{id} - 删除课程 (进度行随外键级联清理)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    let removed = course_repo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("课程 {id} 不存在")));
    }
    tracing::info!(course_id = %id, "Course deleted");
    Ok(Json(()))
}

/// POST /api/courses/reorder - 阶段内重排
///
/// `ordered_ids` 必须恰好是该阶段现有课程 id 的排列 (不多、不少、
/// 不重复)，校验通过后在一个事务里重写整个阶段的 code 和 sort_order。
pub async fn reorder(
    State(state): State<ServerState>,
    Json(req): Json<CourseReorderRequest>,
) -> AppResult<Json<Vec<Course>>> {
    let courses = course_repo::find_all(&state.pool).await?;
    let part_ids: HashSet<i64> = courses
        .iter()
        .filter(|c| c.part() == Some(req.part))
        .map(|c| c.id)
        .collect();

    if part_ids.is_empty() {
        return Err(AppError::not_found(format!("阶段 {} 没有课程", req.part)));
    }

    let submitted: HashSet<i64> = req.ordered_ids.iter().copied().collect();
    if submitted.len() != req.ordered_ids.len() {
        return Err(AppError::validation("ordered_ids 含有重复的课程 id"));
    }
    if submitted != part_ids {
        return Err(AppError::validation(format!(
            "ordered_ids 必须恰好包含阶段 {} 的全部 {} 门课程",
            req.part,
            part_ids.len()
        )));
    }

    let renumbered = renumber_part(req.part, &req.ordered_ids);

    let mut tx = state.pool.begin().await?;
    course_repo::apply_reorder_tx(&mut *tx, &renumbered).await?;
    tx.commit().await?;

    tracing::info!(part = req.part, count = renumbered.len(), "Courses reordered");

    let courses = course_repo::find_all(&state.pool).await?;
    Ok(Json(courses))
}
