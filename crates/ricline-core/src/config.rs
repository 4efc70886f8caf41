use std::env;
use std::fmt::{Debug, Formatter};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.refinitiv.com";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const ENV_APP_KEY: &str = "RICLINE_APP_KEY";
const ENV_MACHINE_ID: &str = "RICLINE_MACHINE_ID";
const ENV_PASSWORD: &str = "RICLINE_PASSWORD";
const ENV_BASE_URL: &str = "RICLINE_BASE_URL";

/// Configuration failures surfaced before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing credential: set {name} or provide a config file")]
    MissingCredential { name: &'static str },
}

/// Platform session configuration.
///
/// Loaded from a JSON config file when one is given, otherwise from
/// `RICLINE_*` environment variables.
#[derive(Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub app_key: String,
    pub machine_id: String,
    pub password: String,
    pub base_url: String,
    pub token_url_override: Option<String>,
    pub timeout_ms: u64,
}

// The password must never reach logs, so Debug redacts it.
impl Debug for PlatformConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("app_key", &self.app_key)
            .field("machine_id", &self.machine_id)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("token_url_override", &self.token_url_override)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    sessions: SessionsSection,
}

#[derive(Debug, Deserialize)]
struct SessionsSection {
    platform: PlatformSection,
}

#[derive(Debug, Deserialize)]
struct PlatformSection {
    #[serde(rename = "app-key")]
    app_key: String,
    #[serde(rename = "machine-id")]
    machine_id: String,
    password: String,
    #[serde(rename = "base-url", default)]
    base_url: Option<String>,
    #[serde(rename = "token-url", default)]
    token_url: Option<String>,
    #[serde(rename = "timeout-ms", default)]
    timeout_ms: Option<u64>,
}

impl PlatformConfig {
    /// Load from the given config file, or from the environment when no
    /// file path is supplied.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    /// Parse a `{"sessions": {"platform": {...}}}` JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&raw)?;
        let platform = file.sessions.platform;

        Ok(Self {
            app_key: platform.app_key,
            machine_id: platform.machine_id,
            password: platform.password,
            base_url: platform
                .base_url
                .unwrap_or_else(|| String::from(DEFAULT_BASE_URL)),
            token_url_override: platform.token_url,
            timeout_ms: platform.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
        })
    }

    /// Read credentials from `RICLINE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app_key: require_env(ENV_APP_KEY)?,
            machine_id: require_env(ENV_MACHINE_ID)?,
            password: require_env(ENV_PASSWORD)?,
            base_url: env::var(ENV_BASE_URL).unwrap_or_else(|_| String::from(DEFAULT_BASE_URL)),
            token_url_override: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    /// OAuth2 token grant endpoint, honoring a configured override.
    pub fn token_url(&self) -> String {
        match &self.token_url_override {
            Some(url) => url.clone(),
            None => format!("{}/auth/oauth2/v1/token", self.base_url.trim_end_matches('/')),
        }
    }

    /// Absolute URL for a data endpoint path.
    pub fn data_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential { name }),
    }
}
