use std::time::Duration;

use anyhow::{Context, Result};

use crate::backend_client::BackendSettings;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare environment starts against a local backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_timeout_secs: u64,
    pub backend_max_attempts: u32,
    pub backend_retry_backoff_ms: u64,
    /// Serve the built-in catalog when the backend cannot answer template calls.
    pub template_fallback: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: env_or("BACKEND_URL", "http://localhost:8000"),
            backend_timeout_secs: parse_env("BACKEND_TIMEOUT_SECS", 120)?,
            backend_max_attempts: parse_env("BACKEND_MAX_ATTEMPTS", 3)?,
            backend_retry_backoff_ms: parse_env("BACKEND_RETRY_BACKOFF_MS", 500)?,
            template_fallback: parse_env("TEMPLATE_FALLBACK", true)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.backend_url.clone(),
            timeout: Duration::from_secs(self.backend_timeout_secs),
            max_attempts: self.backend_max_attempts,
            retry_backoff: Duration::from_millis(self.backend_retry_backoff_ms),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
