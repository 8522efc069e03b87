//! Admin Account Model (管理员)

use serde::{Deserialize, Serialize};

/// Admin account row. `password_hash` never leaves the server boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Admin {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: i64,
}

/// 登录请求 (管理端)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// 登录用户信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    /// "admin" | "student"
    pub role: String,
}

/// 学员端登录请求 (QQ + 口令)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentLoginRequest {
    pub qq: String,
    pub password: String,
}
