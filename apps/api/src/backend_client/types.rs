//! Payload shapes exchanged with the analysis backend.
//!
//! The backend is loose about optional fields, so most structs default missing keys
//! instead of failing the whole response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis
// ────────────────────────────────────────────────────────────────────────────

/// Optional text fields that accompany an uploaded resume on `/analyze`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeFields {
    pub job_description: Option<String>,
    pub target_role: Option<String>,
    pub target_ats: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendAnalysisResponse {
    pub features: AnalysisFeatures,
    pub friendliness: Friendliness,
    #[serde(default)]
    pub relevance: Option<Relevance>,
    #[serde(default)]
    pub ai_insights: Option<AiInsights>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisFeatures {
    pub email_found: bool,
    pub phone_found: bool,
    pub section_count: u32,
    pub detected_sections: Vec<String>,
    pub risk_flags: Vec<String>,
    pub word_count: u32,
    pub raw_text: Option<String>,
    pub ner_skills: Vec<String>,
    pub predicted_category: Option<String>,
    pub category_confidence: Option<f64>,
    pub timeline: Option<BackendTimeline>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendTimeline {
    pub jobs: Vec<BackendJob>,
    pub gaps: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Friendliness {
    pub score: f64,
    pub risk_level: String,
    pub issues: Vec<FriendlinessIssue>,
    pub advice: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendlinessIssue {
    #[serde(rename = "type")]
    pub issue_type: String,
    #[serde(default)]
    pub penalty: f64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Relevance {
    pub score: f64,
    pub semantic_score: f64,
    pub keyword_score: f64,
    pub level: String,
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiInsights {
    pub executive_summary: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub tactical_actions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Rewrite
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionRewriteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_schema: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_index: Option<u32>,
    /// Legacy form: section name plus raw content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ats_rules: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaReport {
    pub total_changes: u32,
    pub keywords_added: Vec<String>,
    pub keywords_added_count: u32,
    pub score_improvement: f64,
    pub friendliness_improvement: f64,
    pub keywords_before: u32,
    pub keywords_after: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FullRewriteResult {
    pub before_score: f64,
    pub after_score: f64,
    pub before_friendliness: f64,
    pub after_friendliness: f64,
    pub file_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docx_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten_text: Option<String>,
    pub delta_report: DeltaReport,
    pub explanations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    Removed,
    Rewritten,
}

/// One itemized edit the rewrite made, with the job-description signal behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub section: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    #[serde(default)]
    pub before: String,
    #[serde(default)]
    pub after: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub jd_signal: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyExpectations {
    pub role_summary: String,
    pub what_the_company_cares_about: Vec<String>,
    pub ideal_candidate_snapshot: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingSkill {
    pub skill: String,
    pub why_it_matters: String,
    pub how_to_build_it: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_story: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionItem {
    pub action: String,
    pub how_to_do_it: String,
    pub resources: Vec<String>,
    pub time_estimate: String,
    pub what_helped_others: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarshReview {
    pub overall_verdict: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_or_weak_skills: Vec<MissingSkill>,
    pub risk_flags: Vec<String>,
    #[serde(rename = "would_I_interview_you", skip_serializing_if = "Option::is_none")]
    pub would_i_interview_you: Option<String>,
    pub rationale: String,
    pub top_3_actions: Vec<ActionItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrutalRewriteResult {
    pub plain_text: String,
    /// Annotated text with `<ADD>`, `<DEL>` and `<REWRITE>` tags.
    pub marked_up_resume: String,
    pub changes: Vec<Change>,
    pub company_expectations: CompanyExpectations,
    pub harsh_review: HarshReview,
    pub original_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// GitHub / templates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubAnalyzeRequest {
    pub github_username: String,
    pub job_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub template_id: String,
    #[serde(default)]
    pub user_data: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub download_url: String,
}
