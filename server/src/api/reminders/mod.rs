//! Reminders API 模块 (催训提醒)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reminders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/snapshot", get(handler::snapshot))
        .route("/refresh", post(handler::refresh))
}
