/// Backend Client: the single point of entry for all calls to the analysis backend.
///
/// ARCHITECTURAL RULE: no other module talks to the backend over HTTP.
/// Parsing, scoring, AI rewriting and GitHub analysis all happen server-side;
/// this module only ships requests and decodes payloads.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Body, Client, RequestBuilder,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::templates::{Template, TemplateQuery};
use crate::upload::Upload;

pub mod types;

use types::{
    AnalyzeFields, BackendAnalysisResponse, BackendHealth, BrutalRewriteResult, ExportRequest,
    ExportResponse, FullRewriteResult, GitHubAnalyzeRequest, SectionRewriteRequest,
};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("No response from server. Please check if the backend is running.")]
    Unreachable(#[source] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected backend payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to build backend request: {0}")]
    Request(String),
}

impl BackendError {
    /// HTTP status the backend answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The operations the UI needs from the analysis backend.
///
/// Carried in `AppState` as `Arc<dyn AnalysisBackend>` so handlers can be tested
/// against a stub.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn health(&self) -> Result<BackendHealth, BackendError>;

    async fn analyze(
        &self,
        upload: &Upload,
        fields: &AnalyzeFields,
    ) -> Result<BackendAnalysisResponse, BackendError>;

    /// Response shape depends on the section type, so it is passed through as-is.
    async fn rewrite_section(&self, request: &SectionRewriteRequest)
        -> Result<Value, BackendError>;

    async fn rewrite_full(
        &self,
        upload: &Upload,
        job_description: &str,
        user_id: &str,
    ) -> Result<FullRewriteResult, BackendError>;

    async fn rewrite_brutal(
        &self,
        upload: &Upload,
        job_description: &str,
        user_id: &str,
    ) -> Result<BrutalRewriteResult, BackendError>;

    async fn analyze_github(&self, request: &GitHubAnalyzeRequest) -> Result<Value, BackendError>;

    async fn recommend_templates(&self, query: &TemplateQuery)
        -> Result<Vec<Template>, BackendError>;

    async fn template_details(&self, template_id: &str) -> Result<Value, BackendError>;

    async fn export_template(&self, request: &ExportRequest)
        -> Result<ExportResponse, BackendError>;
}

/// Connection settings for [`BackendClient`].
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_backoff: Duration,
}

/// Attempts per call are capped here whatever the configuration asks for.
const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Longest single wait between attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// HTTP client for the analysis backend, with retry on transport errors, 429 and 5xx.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    max_attempts: u32,
    retry_backoff: Duration,
}

impl BackendClient {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| BackendError::Request(e.to_string()))?;

        if settings.max_attempts > MAX_ATTEMPTS_LIMIT {
            warn!(
                "Backend max attempts {} exceeds limit, using {}",
                settings.max_attempts, MAX_ATTEMPTS_LIMIT
            );
        }

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_attempts: settings.max_attempts.clamp(1, MAX_ATTEMPTS_LIMIT),
            retry_backoff: settings.retry_backoff,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request built fresh for every attempt and decodes the JSON body.
    /// Retries transport failures, 429 and 5xx with exponential backoff; other
    /// non-success statuses fail immediately with the backend's `detail`.
    async fn send<T, F>(&self, operation: &str, build: F) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        F: Fn() -> Result<RequestBuilder, BackendError>,
    {
        let mut last_error: Option<BackendError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_backoff, attempt);
                warn!(
                    "Backend {} attempt {} failed, retrying after {}ms...",
                    operation,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match build()?.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(BackendError::Unreachable(e));
                    continue;
                }
            };

            let status = response.status();

            if is_retryable(status.as_u16()) {
                let message = error_message(status, response.text().await.unwrap_or_default());
                warn!("Backend {} returned {}: {}", operation, status, message);
                last_error = Some(BackendError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(BackendError::Api {
                    status: status.as_u16(),
                    message: error_message(status, body),
                });
            }

            let body = response.bytes().await.map_err(BackendError::Unreachable)?;
            debug!(
                "Backend {} succeeded: status={}, bytes={}",
                operation,
                status,
                body.len()
            );

            return serde_json::from_slice(&body).map_err(BackendError::Parse);
        }

        Err(last_error.unwrap_or(BackendError::Request(format!(
            "{operation}: no attempts made"
        ))))
    }

    fn resume_form(
        upload: &Upload,
        fields: &[(&'static str, Option<&str>)],
    ) -> Result<Form, BackendError> {
        let mut part = Part::stream_with_length(
            Body::from(upload.bytes.clone()),
            upload.bytes.len() as u64,
        )
        .file_name(upload.filename.clone());

        if let Some(content_type) = upload.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| BackendError::Request(format!("bad content type: {e}")))?;
        }

        let mut form = Form::new().part("file", part);
        for (name, value) in fields {
            if let Some(value) = value {
                form = form.text(*name, value.to_string());
            }
        }
        Ok(form)
    }
}

#[async_trait]
impl AnalysisBackend for BackendClient {
    async fn health(&self) -> Result<BackendHealth, BackendError> {
        self.send("health", || Ok(self.client.get(self.url("/health"))))
            .await
    }

    async fn analyze(
        &self,
        upload: &Upload,
        fields: &AnalyzeFields,
    ) -> Result<BackendAnalysisResponse, BackendError> {
        self.send("analyze", || {
            let form = Self::resume_form(
                upload,
                &[
                    ("job_description", fields.job_description.as_deref()),
                    ("target_role", fields.target_role.as_deref()),
                    ("target_ats", fields.target_ats.as_deref()),
                ],
            )?;
            Ok(self.client.post(self.url("/analyze")).multipart(form))
        })
        .await
    }

    async fn rewrite_section(
        &self,
        request: &SectionRewriteRequest,
    ) -> Result<Value, BackendError> {
        self.send("rewrite_section", || {
            Ok(self
                .client
                .post(self.url("/api/v1/rewrite/section"))
                .json(request))
        })
        .await
    }

    async fn rewrite_full(
        &self,
        upload: &Upload,
        job_description: &str,
        user_id: &str,
    ) -> Result<FullRewriteResult, BackendError> {
        self.send("rewrite_full", || {
            let form = Self::resume_form(
                upload,
                &[
                    ("job_description", Some(job_description)),
                    ("user_id", Some(user_id)),
                ],
            )?;
            Ok(self
                .client
                .post(self.url("/api/v1/rewrite/full"))
                .multipart(form))
        })
        .await
    }

    async fn rewrite_brutal(
        &self,
        upload: &Upload,
        job_description: &str,
        user_id: &str,
    ) -> Result<BrutalRewriteResult, BackendError> {
        self.send("rewrite_brutal", || {
            let form = Self::resume_form(
                upload,
                &[
                    ("job_description", Some(job_description)),
                    ("user_id", Some(user_id)),
                ],
            )?;
            Ok(self
                .client
                .post(self.url("/api/v1/rewrite/brutal"))
                .multipart(form))
        })
        .await
    }

    async fn analyze_github(&self, request: &GitHubAnalyzeRequest) -> Result<Value, BackendError> {
        self.send("analyze_github", || {
            let mut form = Form::new()
                .text("github_username", request.github_username.clone())
                .text("job_role", request.job_role.clone());
            if let Some(jd) = &request.job_description {
                form = form.text("job_description", jd.clone());
            }
            Ok(self
                .client
                .post(self.url("/api/v1/github/analyze"))
                .multipart(form))
        })
        .await
    }

    async fn recommend_templates(
        &self,
        query: &TemplateQuery,
    ) -> Result<Vec<Template>, BackendError> {
        let payload: RecommendPayload = self
            .send("recommend_templates", || {
                Ok(self
                    .client
                    .get(self.url("/api/v1/templates/recommend"))
                    .query(query))
            })
            .await?;
        Ok(payload.into_templates())
    }

    async fn template_details(&self, template_id: &str) -> Result<Value, BackendError> {
        let path = template_path(template_id)?;
        self.send("template_details", || Ok(self.client.get(self.url(&path))))
            .await
    }

    async fn export_template(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportResponse, BackendError> {
        self.send("export_template", || {
            Ok(self
                .client
                .post(self.url("/templates/export"))
                .json(request))
        })
        .await
    }
}

/// The recommend endpoint has answered both as a bare list and wrapped with a count.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecommendPayload {
    Wrapped { templates: Vec<Template> },
    Bare(Vec<Template>),
}

impl RecommendPayload {
    fn into_templates(self) -> Vec<Template> {
        match self {
            RecommendPayload::Wrapped { templates } | RecommendPayload::Bare(templates) => {
                templates
            }
        }
    }
}

/// The id always lands as one escaped path segment, so it cannot climb out of
/// `/api/v1/templates/` or add a query.
fn template_path(template_id: &str) -> Result<String, BackendError> {
    if matches!(template_id, "" | "." | "..") {
        return Err(BackendError::Request(format!(
            "invalid template id '{template_id}'"
        )));
    }
    Ok(format!(
        "/api/v1/templates/{}",
        urlencoding::encode(template_id)
    ))
}

/// Doubles per retry from `base`, saturating, capped at `MAX_RETRY_DELAY`.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32
        .checked_shl(attempt.saturating_sub(1))
        .unwrap_or(u32::MAX);
    base.saturating_mul(factor).min(MAX_RETRY_DELAY)
}

fn is_retryable(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Prefers the backend's `detail` field; falls back to the status text.
fn error_message(status: reqwest::StatusCode, body: String) -> String {
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").cloned())
        .map(|detail| match detail {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        })
}
