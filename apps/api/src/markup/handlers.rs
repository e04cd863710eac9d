use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::markup::{render, RenderMode};

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    /// Absent text renders as empty.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub mode: RenderMode,
}

/// POST /api/v1/markup/render
///
/// Renders backend-annotated text in the requested view mode.
/// Never fails on malformed markup; unmatched tags come back as plain text.
pub async fn handle_render(Json(request): Json<RenderRequest>) -> Response {
    let text = request.text.unwrap_or_default();
    tracing::debug!(mode = ?request.mode, len = text.len(), "Rendering markup");
    Json(render(&text, request.mode)).into_response()
}
