pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::github::handlers as github;
use crate::markup::handlers as markup;
use crate::rewrite::handlers as rewrite;
use crate::state::AppState;
use crate::templates::handlers as templates;
use crate::upload::MAX_UPLOAD_BYTES;

/// Room for multipart framing and text fields around the file itself.
const FORM_OVERHEAD_BYTES: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/health/backend", get(health::backend_health_handler))
        // Markup rendering
        .route("/api/v1/markup/render", post(markup::handle_render))
        // Analysis
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        // Rewrite
        .route(
            "/api/v1/rewrite/section",
            post(rewrite::handle_rewrite_section),
        )
        .route("/api/v1/rewrite/full", post(rewrite::handle_rewrite_full))
        .route(
            "/api/v1/rewrite/brutal",
            post(rewrite::handle_rewrite_brutal),
        )
        // GitHub
        .route("/api/v1/github/analyze", post(github::handle_analyze_github))
        // Templates
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route(
            "/api/v1/templates/recommend",
            get(templates::handle_recommend_templates),
        )
        .route(
            "/api/v1/templates/export",
            post(templates::handle_export_template),
        )
        .route("/api/v1/templates/:id", get(templates::handle_get_template))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + FORM_OVERHEAD_BYTES))
        .with_state(state)
}
