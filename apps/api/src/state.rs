use std::sync::Arc;

use crate::backend_client::AnalysisBackend;
use crate::config::Config;
use crate::templates::TemplateCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Analysis backend. Default: BackendClient over HTTP; tests swap in a stub.
    pub backend: Arc<dyn AnalysisBackend>,
    pub catalog: Arc<TemplateCatalog>,
    pub config: Config,
}
