//! Construction-time configuration for the Configzio client.
//!
//! A configuration names the application and, optionally, tweaks how the
//! transport reaches it. It can be built in code, read from environment
//! variables or loaded from a YAML/JSON file.
//!
//! # Example
//!
//! ```rust,ignore
//! use configzio::ConfigzioConfig;
//! use std::time::Duration;
//!
//! let config = ConfigzioConfig::new("acme")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("acme-backend/1.0");
//!
//! // Or from CONFIGZIO_APPLICATION, CONFIGZIO_BASE_URL, ...
//! let config = ConfigzioConfig::from_env("CONFIGZIO")?;
//! ```

use crate::error::{ConfigzioError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Domain every application is hosted under.
pub const API_DOMAIN: &str = "api.configz.io";

/// Path prefix of every API resource.
pub const API_BASE_PATH: &str = "/api/v2";

fn application_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("valid application pattern"))
}

/// Configuration for a [`ConfigzioClient`](crate::ConfigzioClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigzioConfig {
    /// Application identifier, embedded in the API host name.
    pub application: String,

    /// Origin override used instead of `https://{application}.api.configz.io`.
    ///
    /// The `/api/v2/...` path is still appended.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Transport timeout. No timeout is applied when absent.
    #[serde(default)]
    pub timeout: Option<Duration>,

    /// User agent sent with every request.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ConfigzioConfig {
    /// Create a configuration for the given application.
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            base_url: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Point the client at a different origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Check the application identifier and origin override.
    pub fn validate(&self) -> Result<()> {
        if self.application.is_empty() {
            return Err(ConfigzioError::ConfigError(
                "must provide application".to_string(),
            ));
        }

        if !application_pattern().is_match(&self.application) {
            return Err(ConfigzioError::ConfigError(format!(
                "application must contain only letters, digits and hyphens: {:?}",
                self.application
            )));
        }

        if let Some(base_url) = &self.base_url {
            if base_url.trim_end_matches('/').is_empty() {
                return Err(ConfigzioError::ConfigError(
                    "base_url must not be empty".to_string(),
                ));
            }

            let origin = reqwest::Url::parse(&self.origin()).map_err(|e| {
                ConfigzioError::ConfigError(format!("invalid base_url {:?}: {}", base_url, e))
            })?;

            if !matches!(origin.scheme(), "http" | "https") || !origin.has_host() {
                return Err(ConfigzioError::ConfigError(format!(
                    "base_url must be an http or https origin: {:?}",
                    base_url
                )));
            }
        }

        Ok(())
    }

    /// Scheme and host every request is sent to, without a trailing slash.
    pub fn origin(&self) -> String {
        match &self.base_url {
            Some(base_url) => base_url.trim_end_matches('/').to_string(),
            None => format!("https://{}.{}", self.application, API_DOMAIN),
        }
    }

    /// Full URL of an API resource, e.g. `values/foo/bar`.
    ///
    /// Path segments are used verbatim.
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}{}/{}", self.origin(), API_BASE_PATH, resource)
    }

    /// Load configuration from environment variables with the given prefix.
    ///
    /// Reads `{PREFIX}_APPLICATION` (required), `{PREFIX}_BASE_URL`,
    /// `{PREFIX}_TIMEOUT_SECS` and `{PREFIX}_USER_AGENT`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let application = get_env(&format!("{}_APPLICATION", prefix))?;
        let mut config = Self::new(application);

        config.base_url = get_env_opt(&format!("{}_BASE_URL", prefix));
        config.user_agent = get_env_opt(&format!("{}_USER_AGENT", prefix));

        let timeout_key = format!("{}_TIMEOUT_SECS", prefix);
        if let Some(raw) = get_env_opt(&timeout_key) {
            let secs = raw.parse::<u64>().map_err(|e| {
                ConfigzioError::ConfigError(format!(
                    "Failed to parse environment variable '{}': {}",
                    timeout_key, e
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file (format detected from the extension).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                ConfigzioError::ConfigError(format!(
                    "Unable to determine file extension for {:?}",
                    path
                ))
            })?;

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigzioError::ConfigError(format!("Failed to read config {:?}: {}", path, e))
        })?;

        let config: Self = match extension.to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| {
                ConfigzioError::ConfigError(format!(
                    "Failed to parse YAML config from {:?}: {}",
                    path, e
                ))
            })?,
            "json" => serde_json::from_str(&content).map_err(|e| {
                ConfigzioError::ConfigError(format!(
                    "Failed to parse JSON config from {:?}: {}",
                    path, e
                ))
            })?,
            _ => {
                return Err(ConfigzioError::ConfigError(format!(
                    "Unsupported config file extension: {}",
                    extension
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }
}

fn get_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|e| {
        ConfigzioError::ConfigError(format!("Environment variable '{}' not found: {}", key, e))
    })
}

fn get_env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
