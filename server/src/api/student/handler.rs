//! Student Portal Handlers
//!
//! 学员以 QQ + 口令登录，拿到 student 命名空间的令牌。
//! 口令由管理员代设 (成员接口)，没有口令的成员无法登录学员端。

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::{CurrentUser, Role, verify_password};
use crate::core::ServerState;
use crate::db::repository::member as member_repo;
use crate::db::repository::progress as progress_repo;
use crate::utils::{AppError, AppResult};
use shared::models::{
    LoginResponse, Member, ProgressWithCourse, StudentLoginRequest, UserInfo,
};

const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/student/login - 学员登录 (QQ + 口令)
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<StudentLoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let member = member_repo::find_by_qq(&state.pool, &req.qq).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let member = match member {
        Some(m) => m,
        None => {
            tracing::warn!(qq = %req.qq, "Student login failed - member not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let hash = member_repo::password_hash(&state.pool, member.id).await?;
    let valid = hash
        .map(|h| verify_password(&req.password, &h))
        .unwrap_or(false);
    if !valid {
        tracing::warn!(qq = %req.qq, "Student login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .get_jwt_service()
        .generate_token(member.id, &member.qq, &member.nickname, Role::Student)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(member_id = %member.id, qq = %member.qq, "Student logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: member.id,
            username: member.qq,
            display_name: member.nickname,
            role: Role::Student.as_str().to_string(),
        },
    }))
}

/// GET /api/student/verify - 校验学员令牌
pub async fn verify(Extension(user): Extension<CurrentUser>) -> AppResult<Json<UserInfo>> {
    Ok(Json(UserInfo {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        role: user.role.as_str().to_string(),
    }))
}

/// GET /api/student/profile - 自己的成员档案
pub async fn profile(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Member>> {
    let member = member_repo::find_by_id(&state.pool, user.id)
        .await?
        .filter(|m| m.is_active)
        .ok_or_else(|| AppError::not_found("成员不存在或已停用"))?;
    Ok(Json(member))
}

/// GET /api/student/progress - 自己的全部课程进度 (按课程顺序)
pub async fn progress(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ProgressWithCourse>>> {
    let rows = progress_repo::find_details_by_member(&state.pool, user.id).await?;
    Ok(Json(rows))
}
