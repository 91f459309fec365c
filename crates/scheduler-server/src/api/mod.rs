//! HTTP routes. Handlers live in submodules and share [`AppState`] through `Arc`.

use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod nextdate;
pub mod tasks;

/// Builds the API router with the static front-end mounted as the fallback.
pub fn build_router(state: Arc<AppState>, web_dir: &Path) -> Router {
    Router::new()
        .route("/api/nextdate", get(nextdate::next_date))
        .route(
            "/api/task",
            post(tasks::create_task)
                .get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/api/tasks", get(tasks::list_tasks))
        .route("/api/task/done", post(tasks::complete_task))
        .fallback_service(ServeDir::new(web_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
