//! Admin Authentication Handlers

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::{CurrentUser, Role, verify_password};
use crate::core::ServerState;
use crate::db::repository::admin;
use crate::utils::{AppError, AppResult};
use shared::models::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login - 管理员登录
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let account = admin::find_by_username(&state.pool, &req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // 统一错误消息，防止账号枚举
    let account = match account {
        Some(a) => {
            if !a.is_active {
                return Err(AppError::forbidden("Account has been disabled".to_string()));
            }
            if !verify_password(&req.password, &a.password_hash) {
                tracing::warn!(username = %req.username, "Admin login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            a
        }
        None => {
            tracing::warn!(username = %req.username, "Admin login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .get_jwt_service()
        .generate_token(account.id, &account.username, &account.display_name, Role::Admin)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = %account.id,
        username = %account.username,
        "Admin logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account.id,
            username: account.username,
            display_name: account.display_name,
            role: Role::Admin.as_str().to_string(),
        },
    }))
}

/// GET /api/auth/verify - 校验管理端令牌并返回用户信息
pub async fn verify(
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    Ok(Json(UserInfo {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        role: user.role.as_str().to_string(),
    }))
}

/// POST /api/auth/logout - 登出 (无状态令牌，仅做审计日志)
pub async fn logout(Extension(user): Extension<CurrentUser>) -> AppResult<Json<()>> {
    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        "Admin logged out"
    );
    Ok(Json(()))
}
