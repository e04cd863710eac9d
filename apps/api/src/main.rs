mod analysis;
mod backend_client;
mod config;
mod errors;
mod github;
mod markup;
mod rewrite;
mod routes;
mod state;
mod templates;
mod upload;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend_client::BackendClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::templates::TemplateCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    // Config first: invalid numeric env vars abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATSLens API v{}", env!("CARGO_PKG_VERSION"));

    // Analysis backend client
    let backend = BackendClient::new(config.backend_settings())?;
    info!(
        "Backend client initialized ({}, {} attempts, {}s timeout)",
        backend.base_url(),
        config.backend_max_attempts,
        config.backend_timeout_secs
    );

    // Built-in template catalog, served when the backend cannot answer
    let catalog = Arc::new(TemplateCatalog::builtin()?);
    info!(
        "Template catalog loaded: {} templates (fallback {})",
        catalog.len(),
        if config.template_fallback { "enabled" } else { "disabled" }
    );

    let state = AppState {
        backend: Arc::new(backend),
        catalog,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
