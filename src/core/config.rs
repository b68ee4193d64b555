use serde::{Deserialize, Serialize};
use std::env;

/// Default production host of the market-cap API
pub const DEFAULT_BASE_URL: &str = "https://marketcap.backend.currency.com/api/v1";

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "mcap/0.1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Configuration pointing at the production API
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables
    ///
    /// Recognised environment variables (all optional):
    /// - `{PREFIX}_BASE_URL` (e.g., `MCAP_BASE_URL`)
    /// - `{PREFIX}_USER_AGENT`
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let base_url_var = format!("{}_BASE_URL", prefix.to_uppercase());
        let user_agent_var = format!("{}_USER_AGENT", prefix.to_uppercase());

        Ok(Self {
            base_url: read_var(&base_url_var)?,
            user_agent: read_var(&user_agent_var)?,
        })
    }

    /// Create configuration from a .env file and environment variables
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    ///
    /// A missing file is not an error; the process environment is used as is.
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Set custom base URL (everything before the endpoint path)
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn resolved_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn resolved_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

fn read_var(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidConfiguration(format!(
            "Environment variable {} is not valid unicode",
            name
        ))),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
