use axum::{extract::State, Json};
use serde_json::Value;

use crate::backend_client::types::GitHubAnalyzeRequest;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/github/analyze
///
/// Body: `{ github_username, job_role, job_description? }`.
/// The backend's analysis (top repositories, insights, rate limit) is returned unchanged.
pub async fn handle_analyze_github(
    State(state): State<AppState>,
    Json(request): Json<GitHubAnalyzeRequest>,
) -> Result<Json<Value>, AppError> {
    let request = normalize_request(request)?;

    tracing::info!(
        username = %request.github_username,
        role = %request.job_role,
        "Analyzing GitHub repositories"
    );

    let analysis = state.backend.analyze_github(&request).await?;
    Ok(Json(analysis))
}

fn normalize_request(request: GitHubAnalyzeRequest) -> Result<GitHubAnalyzeRequest, AppError> {
    // Accept pasted profile URLs as well as bare handles.
    let raw = request.github_username.trim();
    let handle = match raw.split_once("github.com/") {
        Some((_, rest)) => rest.split('/').next().unwrap_or_default(),
        None => raw,
    };
    let username = handle.trim().trim_start_matches('@').to_string();

    if username.is_empty() {
        return Err(AppError::Validation(
            "github_username cannot be empty".to_string(),
        ));
    }

    let job_role = request.job_role.trim().to_string();
    if job_role.is_empty() {
        return Err(AppError::Validation("job_role cannot be empty".to_string()));
    }

    Ok(GitHubAnalyzeRequest {
        github_username: username,
        job_role,
        job_description: request
            .job_description
            .map(|jd| jd.trim().to_string())
            .filter(|jd| !jd.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, role: &str) -> GitHubAnalyzeRequest {
        GitHubAnalyzeRequest {
            github_username: username.to_string(),
            job_role: role.to_string(),
            job_description: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_profile_url_reduced_to_handle() {
        let normalized =
            normalize_request(request("https://github.com/amohammed/", "Data Scientist")).unwrap();
        assert_eq!(normalized.github_username, "amohammed");
        assert_eq!(normalized.job_description, None);
    }

    #[test]
    fn test_at_prefix_stripped() {
        let normalized = normalize_request(request(" @octocat ", "Backend Engineer")).unwrap();
        assert_eq!(normalized.github_username, "octocat");
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(normalize_request(request("", "Designer")).is_err());
        assert!(normalize_request(request("octocat", "  ")).is_err());
        assert!(normalize_request(request("https://github.com/", "Designer")).is_err());
    }
}
