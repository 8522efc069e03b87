//! Progress API 模块 (课程进度)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/progress", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_by_member).put(handler::upsert))
        .route("/batch", post(handler::batch))
}
