use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::analysis::mapping::{map_analysis, AnalysisResult};
use crate::backend_client::types::AnalyzeFields;
use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::read_upload_form;

/// POST /api/v1/analyze
///
/// Multipart: `file` (PDF/DOCX) plus optional `job_description`, `target_role`, `target_ats`.
/// The backend does the parsing and scoring; this maps its payload into the report shape.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut form = read_upload_form(multipart).await?;
    let upload = form.require_file()?;
    let fields = AnalyzeFields {
        job_description: form.field("job_description"),
        target_role: form.field("target_role"),
        target_ats: form.field("target_ats"),
    };

    tracing::info!(
        filename = %upload.filename,
        bytes = upload.size(),
        with_jd = fields.job_description.is_some(),
        "Analyzing resume"
    );

    let response = state.backend.analyze(&upload, &fields).await?;

    Ok(Json(map_analysis(&upload.filename, upload.size(), response)))
}
