//! Configuration types.
//!
//! ```toml
//! [api]
//! environment = "development"
//! base_url_dev = "http://127.0.0.1:17788/api/v1/"
//! base_url_pro = "https://novelsapi.sanaoll.com/api/v1/"
//! timeout_secs = 30
//!
//! [session]
//! file = "~/.config/novelhub/session.json"
//! ```
//!
//! Every field is optional; unset fields fall back to the built-in defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Development API base URL.
pub const DEFAULT_BASE_URL_DEV: &str = "http://127.0.0.1:17788/api/v1/";

/// Production API base URL.
pub const DEFAULT_BASE_URL_PRO: &str = "https://novelsapi.sanaoll.com/api/v1/";

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Session file name inside the config directory.
pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Environment variable selecting the environment.
pub const ENV_ENVIRONMENT: &str = "NOVELHUB_ENV";
/// Environment variable overriding the development base URL.
pub const ENV_BASE_URL_DEV: &str = "NOVELHUB_BASE_URL_DEV";
/// Environment variable overriding the production base URL.
pub const ENV_BASE_URL_PRO: &str = "NOVELHUB_BASE_URL_PRO";

// ─────────────────────────────────────────────────────────────────────────────
// Environment
// ─────────────────────────────────────────────────────────────────────────────

/// Which backend deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "pro" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// `[api]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url_dev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url_pro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    fn merge(&mut self, other: ApiConfig) {
        if other.environment.is_some() {
            self.environment = other.environment;
        }
        if other.base_url_dev.is_some() {
            self.base_url_dev = other.base_url_dev;
        }
        if other.base_url_pro.is_some() {
            self.base_url_pro = other.base_url_pro;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}

/// `[session]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where tokens are persisted. `~` expands to the home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Root
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovelHubConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionConfig>,
}

impl NovelHubConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Merge another config on top of this one (other takes priority).
    ///
    /// Merging is per field, so a layer that only sets `timeout_secs` keeps
    /// the base URLs of the layers below it.
    pub fn merge(&mut self, other: NovelHubConfig) {
        if let Some(api) = other.api {
            self.api.get_or_insert_with(ApiConfig::default).merge(api);
        }
        if let Some(session) = other.session
            && session.file.is_some()
        {
            self.session = Some(session);
        }
    }

    /// Apply environment variable overrides using `lookup` to read them.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = get(ENV_ENVIRONMENT)
            .map(|v| v.parse::<Environment>())
            .transpose()?;
        let overrides = ApiConfig {
            environment,
            base_url_dev: get(ENV_BASE_URL_DEV),
            base_url_pro: get(ENV_BASE_URL_PRO),
            timeout_secs: None,
        };
        if overrides != ApiConfig::default() {
            self.api.get_or_insert_with(ApiConfig::default).merge(overrides);
        }
        Ok(())
    }

    /// Configured environment, defaulting to development.
    pub fn environment(&self) -> Environment {
        self.api
            .as_ref()
            .and_then(|a| a.environment)
            .unwrap_or_default()
    }

    /// Base URL for an environment.
    pub fn base_url_for(&self, environment: Environment) -> String {
        let api = self.api.as_ref();
        let configured = match environment {
            Environment::Development => api.and_then(|a| a.base_url_dev.clone()),
            Environment::Production => api.and_then(|a| a.base_url_pro.clone()),
        };
        configured.unwrap_or_else(|| match environment {
            Environment::Development => DEFAULT_BASE_URL_DEV.to_string(),
            Environment::Production => DEFAULT_BASE_URL_PRO.to_string(),
        })
    }

    /// Base URL for the configured environment.
    pub fn base_url(&self) -> String {
        self.base_url_for(self.environment())
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        let secs = self
            .api
            .as_ref()
            .and_then(|a| a.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Session file, relative to `config_dir` when not configured.
    pub fn session_file(&self, config_dir: &Path) -> PathBuf {
        match self.session.as_ref().and_then(|s| s.file.as_ref()) {
            Some(file) => expand_tilde(file),
            None => config_dir.join(DEFAULT_SESSION_FILE),
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
