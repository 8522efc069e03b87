//! Black Point Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::blackpoint as blackpoint_repo;
use crate::utils::{AppError, AppResult};
use shared::models::{BlackPointCreate, BlackPointRecord, BlackPointUpdate};

/// GET /api/blackpoints
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<BlackPointRecord>>> {
    let rows = blackpoint_repo::find_all(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /api/blackpoints/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BlackPointRecord>> {
    let row = blackpoint_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("黑点记录 {id} 不存在")))?;
    Ok(Json(row))
}

/// POST /api/blackpoints
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<BlackPointCreate>,
) -> AppResult<Json<BlackPointRecord>> {
    req.validate()?;
    let row = blackpoint_repo::create(&state.pool, req).await?;
    Ok(Json(row))
}

/// PUT /api/blackpoints/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(req): Json<BlackPointUpdate>,
) -> AppResult<Json<BlackPointRecord>> {
    req.validate()?;
    let row = blackpoint_repo::update(&state.pool, id, req).await?;
    Ok(Json(row))
}

/// DELETE /api/blackpoints/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    let removed = blackpoint_repo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("黑点记录 {id} 不存在")));
    }
    Ok(Json(()))
}
