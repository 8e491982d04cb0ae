pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::knowledge::handlers as knowledge;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            post(analysis::handle_upload_resume).get(analysis::handle_list_resumes),
        )
        .route("/api/v1/chat", post(analysis::handle_chat))
        .route(
            "/api/v1/faq",
            post(knowledge::handle_add_faq).get(knowledge::handle_list_faq),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
