use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "atslens"
    }))
}

/// GET /health/backend
/// Reports whether the analysis backend answers its own health check.
pub async fn backend_health_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let health = state.backend.health().await?;
    Ok(Json(json!({
        "status": health.status,
        "version": health.version,
        "backend_url": state.config.backend_url,
    })))
}
