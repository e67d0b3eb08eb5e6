pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::handle_form_page))
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/pdf", post(handlers::handle_render_form))
        .route("/api/v1/resumes/pdf/json", post(handlers::handle_render_json))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
