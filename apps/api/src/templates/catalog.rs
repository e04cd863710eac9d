//! Built-in template catalog. Immutable after construction; shared via `Arc`.

use std::collections::HashMap;

use crate::templates::model::{
    ExperienceLevel, SampleResume, Template, TemplateFilter, TemplateQuery, TemplateSection,
};

/// Sample resume per template id, embedded at build time.
const SAMPLE_RESUMES: &str = include_str!("../../data/sample_resumes.json");

const ALL_VENDORS: &[&str] = &["taleo", "workday", "greenhouse", "icims"];

#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Catalog seeded with the production template set and its sample resumes.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        let samples: HashMap<String, SampleResume> = serde_json::from_str(SAMPLE_RESUMES)?;
        Ok(Self::new(builtin_templates(samples)))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn get(&self, template_id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.template_id == template_id)
    }

    /// Browse view: search plus role, level and any-of vendor filters, in catalog order.
    pub fn filter(&self, filter: &TemplateFilter) -> Vec<Template> {
        self.templates
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    /// Recommendation view used when the backend cannot be reached.
    pub fn recommend(&self, query: &TemplateQuery) -> Vec<Template> {
        self.templates
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect()
    }
}

fn section(order: u32, name: &str, heading: &str, guidance: &str) -> TemplateSection {
    TemplateSection {
        name: name.to_string(),
        heading: heading.to_string(),
        placeholder: String::new(),
        guidance: guidance.to_string(),
        order,
    }
}

fn standard_sections() -> Vec<TemplateSection> {
    vec![
        section(1, "summary", "Professional Summary", "Lead with years of experience and core strengths."),
        section(2, "experience", "Professional Experience", "Quantify impact; one idea per bullet."),
        section(3, "education", "Education", "Include graduation year."),
        section(4, "skills", "Skills", "Group by category."),
    ]
}

fn build_template(
    id: &str,
    role: &str,
    level: ExperienceLevel,
    name: &str,
    vendors: &[&str],
    content: Option<SampleResume>,
) -> Template {
    let mut sections = standard_sections();
    if level == ExperienceLevel::Entry {
        sections.push(section(5, "projects", "Projects", "Show the full pipeline of 2-3 projects."));
    }

    Template {
        template_id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        experience_level: level.as_str().to_string(),
        ats_compatibility: vendors.iter().map(|v| v.to_string()).collect(),
        ats_success_rate: level.default_success_rate(),
        download_url: format!("/templates/{id}.docx"),
        preview_image_url: None,
        description: Some(format!(
            "Production-ready {}-level {} resume",
            level.as_str().to_lowercase(),
            role.to_lowercase()
        )),
        candidate_name: content.as_ref().map(|c| c.personal_info.name.clone()),
        sections,
        content,
    }
}

fn builtin_templates(mut samples: HashMap<String, SampleResume>) -> Vec<Template> {
    use ExperienceLevel::*;

    let mut entry = |id: &str, role: &str, level: ExperienceLevel, name: &str, vendors: &[&str]| {
        build_template(id, role, level, name, vendors, samples.remove(id))
    };

    vec![
        entry("se-entry-001", "Software Engineer", Entry, "Entry-Level Software Engineer (ATS Optimized)", ALL_VENDORS),
        entry("se-entry-002", "Software Engineer", Entry, "Entry-Level SE - Skills-First (ATS Optimized)", ALL_VENDORS),
        entry("se-mid-001", "Software Engineer", Mid, "Mid-Level Software Engineer", &["taleo", "workday", "greenhouse"]),
        entry("se-senior-001", "Software Engineer", Senior, "Senior Software Engineer", ALL_VENDORS),
        entry("ds-entry-001", "Data Scientist", Entry, "Aisha Mohammed", ALL_VENDORS),
        entry("ds-mid-001", "Data Scientist", Mid, "Marcus Johnson", &["taleo", "greenhouse", "icims"]),
        entry("ds-senior-001", "Data Scientist", Senior, "Dr. Lisa Wang", &["workday", "greenhouse"]),
        entry("ds-exec-001", "Data Scientist", Executive, "Dr. Raj Patel", ALL_VENDORS),
        entry("des-entry-001", "Designer", Entry, "Olivia Kim", &["workday", "greenhouse"]),
        entry("des-mid-001", "Designer", Mid, "David Lee", &["greenhouse", "lever"]),
        entry("des-senior-001", "Designer", Senior, "Emma Davis", ALL_VENDORS),
        entry("des-exec-001", "Designer", Executive, "Robert Chen", ALL_VENDORS),
        entry("pm-entry-001", "Product Manager", Entry, "James Wilson", ALL_VENDORS),
        entry("pm-mid-001", "Product Manager", Mid, "Sarah Chen", &["taleo", "workday"]),
        entry("pm-senior-001", "Product Manager", Senior, "Michael Ross", &["workday", "greenhouse", "icims"]),
        entry("pm-exec-001", "Product Manager", Executive, "Elena Rodriguez", ALL_VENDORS),
        entry("mkt-entry-001", "Marketing", Entry, "Sophie Anderson", ALL_VENDORS),
        entry("mkt-mid-001", "Marketing", Mid, "Ryan Miller", &["taleo", "workday", "icims"]),
        entry("mkt-senior-001", "Marketing", Senior, "Amanda White", ALL_VENDORS),
        entry("mkt-exec-001", "Marketing", Executive, "Thomas Green", ALL_VENDORS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_unique_ids() {
        let catalog = TemplateCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 20);
        let mut ids: Vec<&str> = catalog.templates.iter().map(|t| t.template_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let t = catalog.get("ds-exec-001").unwrap();
        assert_eq!(t.experience_level, "Executive");
        assert!((t.ats_success_rate - 0.94).abs() < f64::EPSILON);
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn test_entry_templates_include_projects_section() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let t = catalog.get("pm-entry-001").unwrap();
        assert!(t.sections.iter().any(|s| s.name == "projects"));
        let t = catalog.get("pm-mid-001").unwrap();
        assert!(!t.sections.iter().any(|s| s.name == "projects"));
    }

    #[test]
    fn test_filter_by_role_and_level() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let filter = TemplateFilter {
            role: Some("Designer".to_string()),
            experience_level: Some("Senior".to_string()),
            ..Default::default()
        };
        let found = catalog.filter(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].template_id, "des-senior-001");
    }

    #[test]
    fn test_filter_search_preserves_catalog_order() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let filter = TemplateFilter {
            search: Some("chen".to_string()),
            ..Default::default()
        };
        let ids: Vec<String> = catalog
            .filter(&filter)
            .into_iter()
            .map(|t| t.template_id)
            .collect();
        assert_eq!(
            ids,
            vec!["se-entry-002", "se-senior-001", "des-exec-001", "pm-mid-001"]
        );
    }

    #[test]
    fn test_recommend_by_vendor() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let query = TemplateQuery {
            ats_vendor: Some("lever".to_string()),
            ..Default::default()
        };
        let found = catalog.recommend(&query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].template_id, "des-mid-001");
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let catalog = TemplateCatalog::builtin().unwrap();
        assert_eq!(catalog.filter(&TemplateFilter::default()).len(), catalog.len());
    }

    #[test]
    fn test_every_template_carries_sample_resume() {
        let catalog = TemplateCatalog::builtin().unwrap();
        for t in &catalog.templates {
            let content = t
                .content
                .as_ref()
                .unwrap_or_else(|| panic!("{} has no sample resume", t.template_id));
            assert_eq!(t.candidate_name.as_deref(), Some(content.personal_info.name.as_str()));
            assert!(!content.summary.is_empty(), "{}", t.template_id);
            assert!(!content.experience.is_empty(), "{}", t.template_id);
            assert!(!content.education.is_empty(), "{}", t.template_id);
        }
    }

    #[test]
    fn test_sample_resume_fields() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let content = catalog.get("des-exec-001").and_then(|t| t.content.as_ref()).unwrap();
        assert_eq!(content.personal_info.name, "Robert Chen");
        assert_eq!(content.personal_info.portfolio.as_deref(), Some("robertchen.design"));
        assert_eq!(content.experience[0].title, "Director of Product Design");
        assert_eq!(content.experience[0].start_date, "July 2017");
        assert_eq!(content.skills[0].category, "Executive");

        let content = catalog.get("ds-entry-001").and_then(|t| t.content.as_ref()).unwrap();
        assert_eq!(content.projects[0].name, "Customer Churn Prediction");
        assert_eq!(content.education[0].details.as_deref(), Some("GPA: 3.8/4.0"));
    }
}
