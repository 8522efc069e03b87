//! Settings API 模块 (全局设置与视图偏好)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_global).put(handler::put_global))
        .route(
            "/views/{view_key}",
            get(handler::get_view).put(handler::put_view),
        )
}
