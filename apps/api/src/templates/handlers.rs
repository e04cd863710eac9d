//! Axum route handlers for the Templates API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::backend_client::types::{ExportRequest, ExportResponse};
use crate::backend_client::BackendError;
use crate::errors::AppError;
use crate::state::AppState;
use crate::templates::model::{Template, TemplateFilter, TemplateQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    Backend,
    Builtin,
}

/// Backend details are passed through untouched; built-in entries serialize as `Template`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TemplateDetails {
    Backend(Value),
    Builtin(Template),
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<Template>,
    pub count: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub templates: Vec<Template>,
    pub count: usize,
    pub source: TemplateSource,
}

/// GET /api/v1/templates
///
/// Browses the built-in catalog: `search`, `role`, `experience_level`, `ats` (comma list).
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(filter): Query<TemplateFilter>,
) -> Json<TemplateListResponse> {
    let templates = state.catalog.filter(&filter);
    Json(TemplateListResponse {
        count: templates.len(),
        total: state.catalog.len(),
        templates,
    })
}

/// GET /api/v1/templates/recommend
///
/// Asks the backend; serves the built-in catalog when the backend is unavailable.
pub async fn handle_recommend_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Result<Json<RecommendResponse>, AppError> {
    let (templates, source) = match state.backend.recommend_templates(&query).await {
        Ok(templates) => (templates, TemplateSource::Backend),
        Err(e) if state.config.template_fallback && is_unavailable(&e) => {
            tracing::warn!("Backend unavailable, using built-in template data: {e}");
            (state.catalog.recommend(&query), TemplateSource::Builtin)
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(RecommendResponse {
        count: templates.len(),
        templates,
        source,
    }))
}

/// GET /api/v1/templates/:id
///
/// Backend details when available; otherwise the built-in entry with the same id.
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<Json<TemplateDetails>, AppError> {
    if matches!(template_id.trim(), "" | "." | "..") {
        return Err(AppError::Validation(format!(
            "'{template_id}' is not a template id"
        )));
    }

    match state.backend.template_details(&template_id).await {
        Ok(details) => Ok(Json(TemplateDetails::Backend(details))),
        Err(e)
            if state.config.template_fallback
                && (is_unavailable(&e) || e.status() == Some(404)) =>
        {
            tracing::debug!("Template {template_id} not served by backend ({e}); checking catalog");
            state
                .catalog
                .get(&template_id)
                .cloned()
                .map(|t| Json(TemplateDetails::Builtin(t)))
                .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /api/v1/templates/export
pub async fn handle_export_template(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    if request.template_id.trim().is_empty() {
        return Err(AppError::Validation(
            "template_id cannot be empty".to_string(),
        ));
    }

    let response = state.backend.export_template(&request).await?;
    Ok(Json(response))
}

/// Failures that mean "the backend could not answer", as opposed to "it said no".
fn is_unavailable(error: &BackendError) -> bool {
    match error {
        BackendError::Unreachable(_) | BackendError::Parse(_) => true,
        BackendError::Api { status, .. } => *status >= 500,
        BackendError::Request(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_count_as_unavailable() {
        assert!(is_unavailable(&BackendError::Api {
            status: 503,
            message: "down".into()
        }));
        assert!(!is_unavailable(&BackendError::Api {
            status: 400,
            message: "bad vendor".into()
        }));
        assert!(!is_unavailable(&BackendError::Request("bad mime".into())));
    }
}
