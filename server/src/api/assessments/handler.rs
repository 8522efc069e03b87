//! Assessment Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::assessment as assessment_repo;
use crate::utils::{AppError, AppResult};
use shared::models::{Assessment, AssessmentCreate, AssessmentUpdate};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub member_id: Option<i64>,
}

/// GET /api/assessments?member_id= - 考核记录 (可按成员过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Assessment>>> {
    let rows = match query.member_id {
        Some(member_id) => assessment_repo::find_by_member(&state.pool, member_id).await?,
        None => assessment_repo::find_all(&state.pool).await?,
    };
    Ok(Json(rows))
}

/// GET /api/assessments/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Assessment>> {
    let row = assessment_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("考核记录 {id} 不存在")))?;
    Ok(Json(row))
}

/// POST /api/assessments
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<AssessmentCreate>,
) -> AppResult<Json<Assessment>> {
    req.validate()?;
    let row = assessment_repo::create(&state.pool, req).await?;
    Ok(Json(row))
}

/// PUT /api/assessments/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<AssessmentUpdate>,
) -> AppResult<Json<Assessment>> {
    req.validate()?;
    let row = assessment_repo::update(&state.pool, id, req).await?;
    Ok(Json(row))
}

/// DELETE /api/assessments/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    let removed = assessment_repo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("考核记录 {id} 不存在")));
    }
    Ok(Json(()))
}
