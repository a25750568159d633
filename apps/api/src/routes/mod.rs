pub mod health;
pub mod index;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers::{self as screening, MAX_UPLOAD_BYTES};
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        // Screening API
        .route("/screen-resume", post(screening::handle_screen_resume))
        .route(
            "/screen-resume/upload",
            post(screening::handle_screen_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Skills API
        .route("/skills/extract", post(skills::handle_extract_skills))
        .route("/skills/experience", post(skills::handle_analyze_experience))
        .with_state(state)
}
