//! Maps the backend's analysis payload into the `AnalysisResult` report.
//!
//! Vendor verdicts are derived from backend risk flags; issue severity from penalty size.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend_client::types::{AiInsights, BackendAnalysisResponse, BackendJob};

/// Penalties strictly above this are reported as critical.
const CRITICAL_PENALTY: f64 = 10.0;

/// Risk flag → vendor it breaks. Greenhouse has no known flag and always passes.
const VENDOR_RISK_FLAGS: &[(&str, Option<&str>)] = &[
    ("taleo", Some("TALEO_TABLE_RISK")),
    ("workday", Some("WORKDAY_PARSING_RISK")),
    ("greenhouse", None),
    ("icims", Some("ICIMS_FRAGMENTATION_RISK")),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorVerdict {
    pub status: VendorStatus,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalIssue {
    pub severity: IssueSeverity,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub title: String,
    pub description: String,
    pub fix_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsExtracted {
    pub skills: Vec<String>,
    pub job_titles: Vec<String>,
    pub education: Vec<String>,
    pub contact: Vec<String>,
    pub raw_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub role: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub jobs: Vec<TimelineItem>,
    pub gaps: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityBreakdown {
    pub semantic_score: f64,
    pub keyword_score: f64,
    pub level: String,
}

/// The report the UI renders after an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub file_size_bytes: usize,
    pub word_count: u32,
    pub friendliness_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    pub vendor_compatibility: BTreeMap<String, VendorVerdict>,
    pub critical_issues: Vec<CriticalIssue>,
    pub ats_extracted: AtsExtracted,
    pub timeline: Timeline,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_breakdown: Option<VisibilityBreakdown>,
    pub missing_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
}

pub fn map_analysis(
    filename: &str,
    file_size_bytes: usize,
    response: BackendAnalysisResponse,
) -> AnalysisResult {
    let BackendAnalysisResponse {
        features,
        friendliness,
        relevance,
        ai_insights,
    } = response;

    let vendor_compatibility = VENDOR_RISK_FLAGS
        .iter()
        .map(|(vendor, flag)| {
            let failed = flag.is_some_and(|f| features.risk_flags.iter().any(|r| r == f));
            let status = if failed {
                VendorStatus::Fail
            } else {
                VendorStatus::Pass
            };
            (
                vendor.to_string(),
                VendorVerdict {
                    status,
                    issues: vec![],
                },
            )
        })
        .collect();

    let critical_issues = friendliness
        .issues
        .into_iter()
        .map(|issue| CriticalIssue {
            severity: if issue.penalty > CRITICAL_PENALTY {
                IssueSeverity::Critical
            } else {
                IssueSeverity::Warning
            },
            title: issue.issue_type.replace('_', " "),
            issue_type: issue.issue_type,
            description: issue.message,
            fix_suggestions: vec![],
        })
        .collect();

    let contact = vec![
        if features.email_found {
            "Email Detected"
        } else {
            "No Email"
        }
        .to_string(),
        if features.phone_found {
            "Phone Detected"
        } else {
            "No Phone"
        }
        .to_string(),
    ];

    let raw_text = features
        .raw_text
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No text extracted".to_string());

    let timeline = features.timeline.unwrap_or_default();
    let timeline = Timeline {
        jobs: timeline.jobs.into_iter().map(map_job).collect(),
        gaps: timeline.gaps,
    };

    let (match_score, visibility_breakdown, missing_keywords) = match relevance {
        Some(r) => (
            Some(r.score),
            Some(VisibilityBreakdown {
                semantic_score: r.semantic_score,
                keyword_score: r.keyword_score,
                level: r.level,
            }),
            r.missing_keywords,
        ),
        None => (None, None, vec![]),
    };

    AnalysisResult {
        filename: filename.to_string(),
        file_size_bytes,
        word_count: features.word_count,
        friendliness_score: friendliness.score,
        match_score,
        vendor_compatibility,
        critical_issues,
        ats_extracted: AtsExtracted {
            skills: features.ner_skills,
            job_titles: vec![],
            education: vec![],
            contact,
            raw_text,
        },
        timeline,
        recommendations: friendliness.advice,
        visibility_breakdown,
        missing_keywords,
        ai_insights,
    }
}

fn map_job(job: BackendJob) -> TimelineItem {
    TimelineItem {
        role: job.title.unwrap_or_default(),
        company: job.company.unwrap_or_default(),
        start_date: job.start_date.unwrap_or_default(),
        end_date: job.end_date.unwrap_or_default(),
    }
}
