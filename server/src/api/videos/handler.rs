//! Video Handlers
//!
//! 本地只存引用 (slug/链接)；列表、目录、直传地址都是对托管
//! 平台的透传。平台未配置时这些端点返回可读错误。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{course as course_repo, video as video_repo};
use crate::utils::{AppError, AppResult};
use shared::models::{HostedFolder, HostedVideo, UploadLink, UploadLinkRequest, VideoImport, VideoRecord};

/// GET /api/videos - 已导入的视频引用
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<VideoRecord>>> {
    let rows = video_repo::find_all(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /api/videos/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<VideoRecord>> {
    let row = video_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("视频 {id} 不存在")))?;
    Ok(Json(row))
}

#[derive(Debug, Default, Deserialize)]
pub struct HostedQuery {
    pub folder: Option<String>,
}

/// GET /api/videos/hosted?folder= - 托管平台上的视频列表
pub async fn hosted_videos(
    State(state): State<ServerState>,
    Query(query): Query<HostedQuery>,
) -> AppResult<Json<Vec<HostedVideo>>> {
    let client = state.video_host()?;
    let videos = client.list_videos(query.folder.as_deref()).await?;
    Ok(Json(videos))
}

/// GET /api/videos/folders - 托管平台上的目录
pub async fn hosted_folders(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<HostedFolder>>> {
    let client = state.video_host()?;
    let folders = client.list_folders().await?;
    Ok(Json(folders))
}

/// POST /api/videos/import - 把平台上的视频导入为本地引用
pub async fn import(
    State(state): State<ServerState>,
    Json(req): Json<VideoImport>,
) -> AppResult<Json<VideoRecord>> {
    req.validate()?;
    if let Some(course_id) = req.course_id {
        course_repo::find_by_id(&state.pool, course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("课程 {course_id} 不存在")))?;
    }

    let url = state.video_host()?.video_url(&req.slug);
    let row = video_repo::create(&state.pool, &req.title, &req.slug, &url, req.course_id).await?;
    tracing::info!(video_id = %row.id, slug = %row.slug, "Video imported");
    Ok(Json(row))
}

/// POST /api/videos/upload-link - 向平台申请直传地址
pub async fn upload_link(
    State(state): State<ServerState>,
    Json(req): Json<UploadLinkRequest>,
) -> AppResult<Json<UploadLink>> {
    req.validate()?;
    let client = state.video_host()?;
    let link = client
        .create_upload_link(&req.title, req.folder.as_deref())
        .await?;
    tracing::info!(slug = %link.slug, "Upload link created");
    Ok(Json(link))
}

/// DELETE /api/videos/{id} - 删除本地引用 (平台上的视频不动)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    let removed = video_repo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("视频 {id} 不存在")));
    }
    Ok(Json(()))
}
