//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct,
//! and resolves the API base URL once so every page shares the same value.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::AppError;

/// Raw configuration as read from the environment.
///
/// # Environment Variables
///
/// - `API_BASE_URL` (optional): REST API base URL, defaults to `http://localhost:8081`
/// - `REQUEST_TIMEOUT_SECS` (optional): per-request timeout; unset means no timeout
#[derive(Debug, Clone, Deserialize)]
struct RawConfig {
    #[serde(default = "default_api_base_url")]
    api_base_url: String,

    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

/// Default API location if API_BASE_URL is not set.
fn default_api_base_url() -> String {
    "http://localhost:8081".to_string()
}

/// Resolved application configuration.
///
/// Built once at startup and shared (by clone) with every page controller.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every collection path is joined onto
    pub api_base_url: Url,

    /// Optional timeout applied to the HTTP client
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and resolves them into a Config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Environment variable values cannot be parsed into expected types
    /// - `API_BASE_URL` is not a valid absolute URL
    pub fn from_env() -> anyhow::Result<Self> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: api_base_url -> API_BASE_URL
        let raw = envy::from_env::<RawConfig>()?;
        let config = Self::resolve(&raw.api_base_url, raw.request_timeout_secs)?;
        Ok(config)
    }

    /// Build a Config from an explicit base URL (used by tests and embedders).
    pub fn with_base_url(base_url: &str) -> Result<Self, AppError> {
        Self::resolve(base_url, None)
    }

    fn resolve(base_url: &str, timeout_secs: Option<u64>) -> Result<Self, AppError> {
        let api_base_url = Url::parse(base_url.trim_end_matches('/'))?;
        Ok(Self {
            api_base_url,
            request_timeout: timeout_secs.map(Duration::from_secs),
        })
    }

    /// Join a collection path such as `/bank-account/3` onto the base URL.
    ///
    /// The base may carry its own path prefix (`http://host/api`); it is kept.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.api_base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/{}", prefix, path.trim_start_matches('/')));
        url
    }
}
