//! Axum route handlers for the Rewrite API.

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::backend_client::types::{BrutalRewriteResult, FullRewriteResult, SectionRewriteRequest};
use crate::errors::AppError;
use crate::markup::MarkupViews;
use crate::state::AppState;
use crate::upload::{read_upload_form, Upload, UploadForm};

const DEFAULT_USER_ID: &str = "anonymous";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Brutal review as returned by the backend, plus its annotated resume pre-rendered.
#[derive(Debug, Serialize)]
pub struct BrutalReviewResponse<'a> {
    #[serde(flatten)]
    pub result: &'a BrutalRewriteResult,
    pub markup: MarkupViews<'a>,
}

struct RewriteInput {
    upload: Upload,
    job_description: String,
    user_id: String,
}

impl RewriteInput {
    fn from_form(mut form: UploadForm) -> Result<Self, AppError> {
        let upload = form.require_file()?;
        let job_description = form
            .field("job_description")
            .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;
        let user_id = form
            .field("user_id")
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        Ok(Self {
            upload,
            job_description,
            user_id,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rewrite/section
///
/// Either a layout schema with a section index, or the legacy section/content pair.
pub async fn handle_rewrite_section(
    State(state): State<AppState>,
    Json(request): Json<SectionRewriteRequest>,
) -> Result<Json<Value>, AppError> {
    validate_section_request(&request)?;

    let result = state.backend.rewrite_section(&request).await?;
    Ok(Json(result))
}

/// POST /api/v1/rewrite/full
///
/// Multipart: `file`, `job_description`, optional `user_id`.
pub async fn handle_rewrite_full(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FullRewriteResult>, AppError> {
    let input = RewriteInput::from_form(read_upload_form(multipart).await?)?;

    tracing::info!(
        filename = %input.upload.filename,
        user_id = %input.user_id,
        "Requesting full rewrite"
    );

    let result = state
        .backend
        .rewrite_full(&input.upload, &input.job_description, &input.user_id)
        .await?;

    tracing::info!(
        before = result.before_score,
        after = result.after_score,
        changes = result.delta_report.total_changes,
        "Full rewrite complete"
    );

    Ok(Json(result))
}

/// POST /api/v1/rewrite/brutal
///
/// Multipart: `file`, `job_description`, optional `user_id`.
/// The annotated resume comes back rendered in both clean and changes views.
pub async fn handle_rewrite_brutal(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let input = RewriteInput::from_form(read_upload_form(multipart).await?)?;

    tracing::info!(
        filename = %input.upload.filename,
        user_id = %input.user_id,
        "Requesting brutal review"
    );

    let result = state
        .backend
        .rewrite_brutal(&input.upload, &input.job_description, &input.user_id)
        .await?;

    let markup = MarkupViews::of(&result.marked_up_resume);
    tracing::debug!(
        spans = markup.summary.total(),
        deletions = markup.summary.deletions,
        itemized = result.changes.len(),
        "Rendered brutal review markup"
    );

    Ok(Json(BrutalReviewResponse {
        result: &result,
        markup,
    })
    .into_response())
}

fn validate_section_request(request: &SectionRewriteRequest) -> Result<(), AppError> {
    match (&request.layout_schema, &request.content) {
        (Some(_), _) if request.section_index.is_none() => Err(AppError::Validation(
            "section_index is required with layout_schema".to_string(),
        )),
        (Some(_), _) => Ok(()),
        (None, Some(content)) if !content.trim().is_empty() => Ok(()),
        _ => Err(AppError::Validation(
            "Provide layout_schema with section_index, or non-empty content".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;

    #[test]
    fn test_section_request_with_schema_needs_index() {
        let request = SectionRewriteRequest {
            layout_schema: Some(Map::new()),
            ..Default::default()
        };
        assert!(validate_section_request(&request).is_err());

        let request = SectionRewriteRequest {
            layout_schema: Some(Map::new()),
            section_index: Some(0),
            ..Default::default()
        };
        assert!(validate_section_request(&request).is_ok());
    }

    #[test]
    fn test_legacy_section_request_needs_content() {
        let request = SectionRewriteRequest {
            section: Some("summary".to_string()),
            content: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(validate_section_request(&request).is_err());

        let request = SectionRewriteRequest {
            section: Some("summary".to_string()),
            content: Some("Engineer with 5 years".to_string()),
            ..Default::default()
        };
        assert!(validate_section_request(&request).is_ok());
    }

    #[test]
    fn test_brutal_response_flattens_result_and_adds_markup() {
        let result = BrutalRewriteResult {
            plain_text: "Built a platform".to_string(),
            marked_up_resume: "Built <DEL>a site</DEL><ADD>a platform</ADD>".to_string(),
            ..Default::default()
        };
        let response = BrutalReviewResponse {
            result: &result,
            markup: MarkupViews::of(&result.marked_up_resume),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["plain_text"], "Built a platform");
        assert_eq!(value["markup"]["clean"], "Built a platform");
        assert_eq!(
            value["markup"]["changes"],
            json!([
                {"kind": "plain", "text": "Built "},
                {"kind": "deleted", "text": "a site"},
                {"kind": "added", "text": "a platform"}
            ])
        );
        assert_eq!(value["markup"]["summary"]["additions"], 1);
    }
}
