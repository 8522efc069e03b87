//! Videos API 模块 (教学视频)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/videos", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/hosted", get(handler::hosted_videos))
        .route("/folders", get(handler::hosted_folders))
        .route("/import", post(handler::import))
        .route("/upload-link", post(handler::upload_link))
}
