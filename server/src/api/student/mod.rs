//! Student Portal API 模块
//!
//! 学员端只读自己的档案和进度，使用独立的令牌命名空间
//! (`/api/student/*` 要求 student 令牌，管理端令牌在此无效)。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/student", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/verify", get(handler::verify))
        .route("/profile", get(handler::profile))
        .route("/progress", get(handler::progress))
}
