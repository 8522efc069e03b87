//! Retention Handlers (退会挽留跟进)

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::retention as retention_repo;
use crate::utils::{AppError, AppResult};
use shared::models::{RetentionCreate, RetentionRecord, RetentionUpdate};

/// GET /api/retention
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<RetentionRecord>>> {
    let rows = retention_repo::find_all(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /api/retention/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RetentionRecord>> {
    let row = retention_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("挽留记录 {id} 不存在")))?;
    Ok(Json(row))
}

/// POST /api/retention
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<RetentionCreate>,
) -> AppResult<Json<RetentionRecord>> {
    req.validate()?;
    let row = retention_repo::create(&state.pool, req).await?;
    Ok(Json(row))
}

/// PUT /api/retention/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<RetentionUpdate>,
) -> AppResult<Json<RetentionRecord>> {
    req.validate()?;
    let row = retention_repo::update(&state.pool, id, req).await?;
    Ok(Json(row))
}

/// DELETE /api/retention/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    let removed = retention_repo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("挽留记录 {id} 不存在")));
    }
    Ok(Json(()))
}
