//! In-process stand-ins for the analysis backend, used by router tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::backend_client::types::{
    AnalysisFeatures, AnalyzeFields, BackendAnalysisResponse, BackendHealth, BrutalRewriteResult,
    ExportRequest, ExportResponse, Friendliness, FriendlinessIssue, FullRewriteResult,
    GitHubAnalyzeRequest, SectionRewriteRequest,
};
use crate::backend_client::{AnalysisBackend, BackendError};
use crate::config::Config;
use crate::state::AppState;
use crate::templates::{Template, TemplateCatalog, TemplateQuery};
use crate::upload::Upload;

/// Canned backend. `fail_with` makes every call answer with that HTTP status instead.
pub struct StubBackend {
    pub fail_with: Option<u16>,
}

impl StubBackend {
    fn check(&self) -> Result<(), BackendError> {
        match self.fail_with {
            Some(status) => Err(BackendError::Api {
                status,
                message: format!("stub backend answered {status}"),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AnalysisBackend for StubBackend {
    async fn health(&self) -> Result<BackendHealth, BackendError> {
        self.check()?;
        Ok(BackendHealth {
            status: "healthy".to_string(),
            version: Some("2.0.0".to_string()),
        })
    }

    async fn analyze(
        &self,
        _upload: &Upload,
        _fields: &AnalyzeFields,
    ) -> Result<BackendAnalysisResponse, BackendError> {
        self.check()?;
        Ok(BackendAnalysisResponse {
            features: AnalysisFeatures {
                email_found: true,
                word_count: 512,
                risk_flags: vec!["TALEO_TABLE_RISK".to_string()],
                raw_text: Some("Jane Doe\nSoftware Engineer".to_string()),
                ..Default::default()
            },
            friendliness: Friendliness {
                score: 72.0,
                issues: vec![FriendlinessIssue {
                    issue_type: "TABLE_LAYOUT".to_string(),
                    penalty: 15.0,
                    message: "Tables detected".to_string(),
                }],
                ..Default::default()
            },
            relevance: None,
            ai_insights: None,
        })
    }

    async fn rewrite_section(&self, request: &SectionRewriteRequest) -> Result<Value, BackendError> {
        self.check()?;
        Ok(json!({
            "section": request.section,
            "rewritten": "Led a team of 5 engineers",
        }))
    }

    async fn rewrite_full(
        &self,
        _upload: &Upload,
        _job_description: &str,
        _user_id: &str,
    ) -> Result<FullRewriteResult, BackendError> {
        self.check()?;
        Ok(FullRewriteResult {
            before_score: 54.0,
            after_score: 81.0,
            file_url: "/files/rewritten.docx".to_string(),
            ..Default::default()
        })
    }

    async fn rewrite_brutal(
        &self,
        _upload: &Upload,
        _job_description: &str,
        _user_id: &str,
    ) -> Result<BrutalRewriteResult, BackendError> {
        self.check()?;
        Ok(BrutalRewriteResult {
            plain_text: "Built a scalable e-commerce platform".to_string(),
            marked_up_resume: "Built <DEL>a website</DEL><ADD>a scalable e-commerce platform</ADD>"
                .to_string(),
            original_text: "Built a website".to_string(),
            ..Default::default()
        })
    }

    async fn analyze_github(&self, request: &GitHubAnalyzeRequest) -> Result<Value, BackendError> {
        self.check()?;
        Ok(json!({
            "username": request.github_username,
            "top_repositories": [],
        }))
    }

    async fn recommend_templates(&self, _query: &TemplateQuery) -> Result<Vec<Template>, BackendError> {
        self.check()?;
        Ok(vec![])
    }

    async fn template_details(&self, template_id: &str) -> Result<Value, BackendError> {
        self.check()?;
        Err(BackendError::Api {
            status: 404,
            message: format!("Template {template_id} not found"),
        })
    }

    async fn export_template(&self, request: &ExportRequest) -> Result<ExportResponse, BackendError> {
        self.check()?;
        Ok(ExportResponse {
            download_url: format!("/exports/{}.docx", request.template_id),
        })
    }
}

pub fn test_config() -> Config {
    Config {
        backend_url: "http://stub".to_string(),
        backend_timeout_secs: 5,
        backend_max_attempts: 1,
        backend_retry_backoff_ms: 1,
        template_fallback: true,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

/// Fallback enabled; `down` makes the backend answer 503 everywhere.
pub fn test_state(down: bool) -> AppState {
    stub_state(down.then_some(503), true)
}

pub fn stub_state(fail_with: Option<u16>, template_fallback: bool) -> AppState {
    AppState {
        backend: Arc::new(StubBackend { fail_with }),
        catalog: Arc::new(TemplateCatalog::builtin().unwrap()),
        config: Config {
            template_fallback,
            ..test_config()
        },
    }
}
