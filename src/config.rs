use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the admin tools, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Scheme and host of the resource API.
    pub api_url: String,
    pub api_timeout: Duration,
    /// Channel capacity of views and the local store actor.
    pub view_buffer: usize,
    /// File the user-added `type` labels are kept in.
    pub labels_path: PathBuf,
}

impl AdminConfig {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:3000";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_VIEW_BUFFER: usize = 32;
    pub const DEFAULT_LABELS_PATH: &'static str = ".resource-admin-labels.json";

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_timeout_secs: u64 = lookup("RESOURCE_API_TIMEOUT_SECS")
            .unwrap_or_else(|| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .context("RESOURCE_API_TIMEOUT_SECS must be a whole number of seconds")?;
        let view_buffer: usize = lookup("RESOURCE_VIEW_BUFFER")
            .unwrap_or_else(|| Self::DEFAULT_VIEW_BUFFER.to_string())
            .parse()
            .context("RESOURCE_VIEW_BUFFER must be a valid number")?;
        anyhow::ensure!(view_buffer > 0, "RESOURCE_VIEW_BUFFER must be at least 1");

        Ok(Self {
            api_url: lookup("RESOURCE_API_URL")
                .unwrap_or_else(|| Self::DEFAULT_API_URL.to_string()),
            api_timeout: Duration::from_secs(api_timeout_secs),
            view_buffer,
            labels_path: lookup("RESOURCE_LABELS_PATH")
                .unwrap_or_else(|| Self::DEFAULT_LABELS_PATH.to_string())
                .into(),
        })
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            view_buffer: Self::DEFAULT_VIEW_BUFFER,
            labels_path: PathBuf::from(Self::DEFAULT_LABELS_PATH),
        }
    }
}
