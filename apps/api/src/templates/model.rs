use serde::{Deserialize, Serialize};

/// Seniority band a template targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    /// ATS pass rate assumed for a template of this level when none is recorded.
    pub fn default_success_rate(self) -> f64 {
        match self {
            ExperienceLevel::Entry => 0.88,
            ExperienceLevel::Mid => 0.93,
            ExperienceLevel::Senior => 0.96,
            ExperienceLevel::Executive => 0.94,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Executive => "Executive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub name: String,
    pub heading: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub guidance: String,
    pub order: u32,
}

/// A resume template. Field aliases accept the backend's naming
/// (`id`, `ats_vendors`, `file_url`) as well as ours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(alias = "id")]
    pub template_id: String,
    pub name: String,
    pub role: String,
    pub experience_level: String,
    #[serde(default, alias = "ats_vendors")]
    pub ats_compatibility: Vec<String>,
    #[serde(default)]
    pub ats_success_rate: f64,
    #[serde(default, alias = "file_url")]
    pub download_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the sample candidate filled into the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<TemplateSection>,
    /// Filled-in example resume, so a template can be previewed or exported as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<SampleResume>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleResume {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<ExperienceEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectEntry>,
    pub education: Vec<EducationEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub location: String,
    pub graduation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coursework: Option<String>,
}

impl Template {
    pub fn supports_vendor(&self, vendor: &str) -> bool {
        let vendor = normalize(vendor);
        self.ats_compatibility.iter().any(|v| normalize(v) == vendor)
    }

    /// Case-insensitive substring match over name, role and sample candidate.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.role.to_lowercase().contains(&needle)
            || self
                .candidate_name
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
    }
}

/// Recommendation query: every present field must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
}

impl TemplateQuery {
    pub fn matches(&self, template: &Template) -> bool {
        self.role
            .as_deref()
            .map_or(true, |r| same_label(r, &template.role))
            && self
                .experience_level
                .as_deref()
                .map_or(true, |l| same_label(l, &template.experience_level))
            && self
                .ats_vendor
                .as_deref()
                .map_or(true, |v| template.supports_vendor(v))
    }
}

/// Browse filter. `ats` is a comma-separated vendor list; a template passes
/// when it supports ANY of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub ats: Option<String>,
}

impl TemplateFilter {
    pub fn vendors(&self) -> Vec<&str> {
        self.ats
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn matches(&self, template: &Template) -> bool {
        let vendors = self.vendors();
        self.search
            .as_deref()
            .map_or(true, |q| template.matches_search(q.trim()))
            && non_blank(self.role.as_deref()).map_or(true, |r| same_label(r, &template.role))
            && non_blank(self.experience_level.as_deref())
                .map_or(true, |l| same_label(l, &template.experience_level))
            && (vendors.is_empty() || vendors.iter().any(|v| template.supports_vendor(v)))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Labels compare after normalization, so `Software Engineer` == `software-engineer`.
fn same_label(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '_' {
                '-'
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}
