// Template browsing: built-in ATS-verified templates, filtering and search,
// plus upstream recommendations with a local fallback.

pub mod catalog;
pub mod handlers;
pub mod model;

pub use catalog::TemplateCatalog;
pub use model::{Template, TemplateQuery};
