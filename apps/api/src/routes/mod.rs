pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::layout::handlers as render;
use crate::prose::handlers as prose;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/evaluate", post(analysis::handle_evaluate))
        .route(
            "/api/v1/evaluate/profile",
            post(analysis::handle_evaluate_profile),
        )
        // Render API
        .route("/api/v1/render/resume", post(render::handle_render_resume))
        .route(
            "/api/v1/render/cover-letter",
            post(render::handle_render_cover_letter),
        )
        .route("/api/v1/render/bio", post(render::handle_render_bio))
        // Prose API
        .route("/api/v1/prose/parse", post(prose::handle_parse_prose))
        .with_state(state)
}
