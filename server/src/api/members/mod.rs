//! Members API 模块 (成员管理)

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/members", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/search", get(handler::search))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/reminder-timeout", put(handler::set_reminder_timeout))
        .route("/{id}/password", put(handler::set_password))
        .route("/sync-stage", post(handler::sync_stage))
        .route("/batch", post(handler::batch))
}
