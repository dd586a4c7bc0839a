//! Runtime configuration loaded from the environment.

use std::env;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BLOG_API_URL must start with http:// or https://, got {0:?}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Host serving `/api/blogs`.
    pub api_url: String,
    /// Emit logs as JSON lines.
    pub json_logs: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            json_logs: false,
        }
    }
}

impl DashboardConfig {
    /// Reads `BLOG_API_URL` and `LOG_FORMAT`. A `.env` file in the working
    /// directory is honoured when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_vars(env::var("BLOG_API_URL").ok(), env::var("LOG_FORMAT").ok())
    }

    fn from_vars(api_url: Option<String>, log_format: Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            json_logs: log_format
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_url = api_url.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.starts_with("http://") || self.api_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidUrl(self.api_url.clone()))
        }
    }
}
