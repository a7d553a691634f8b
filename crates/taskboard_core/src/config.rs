//! Static configuration: which backend serves the API and how logging runs.
//!
//! # Responsibility
//! - Describe the mock-vs-remote switch as data, resolved once at start-up.
//! - Load that data from JSON or from `TASKBOARD_*` environment variables.
//!
//! # Invariants
//! - Absent settings fall back to the mock backend with seeded demo data,
//!   800 ms latency and sequential ids.
//! - A remote backend always carries a non-empty base URL.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LoggingConfig;
use crate::store::{IdStrategy, StoreOptions, DEFAULT_LATENCY};

pub const ENV_BACKEND: &str = "TASKBOARD_BACKEND";
pub const ENV_LATENCY_MS: &str = "TASKBOARD_LATENCY_MS";
pub const ENV_ID_STRATEGY: &str = "TASKBOARD_ID_STRATEGY";
pub const ENV_SEED: &str = "TASKBOARD_SEED";
pub const ENV_REMOTE_URL: &str = "TASKBOARD_REMOTE_URL";
pub const ENV_REMOTE_TIMEOUT_MS: &str = "TASKBOARD_REMOTE_TIMEOUT_MS";
pub const ENV_LOG_LEVEL: &str = "TASKBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKBOARD_LOG_DIR";

const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug)]
pub enum ConfigError {
    MissingValue(&'static str),
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    Parse(serde_json::Error),
    /// HTTP client for the remote backend could not be built.
    Client(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue(key) => write!(f, "missing configuration value `{key}`"),
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for `{key}`: {reason}")
            }
            Self::Parse(err) => write!(f, "invalid configuration document: {err}"),
            Self::Client(message) => write!(f, "failed to build http client: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// In-memory backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockConfig {
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            id_strategy: IdStrategy::default(),
            seed: default_seed(),
        }
    }
}

impl MockConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            latency: Duration::from_millis(self.latency_ms),
            id_strategy: self.id_strategy,
            seed: self.seed,
        }
    }
}

/// REST backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    pub base_url: String,
    #[serde(default = "default_remote_timeout_ms")]
    pub timeout_ms: u64,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_REMOTE_TIMEOUT_MS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Which implementation sits behind the API facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    Mock(MockConfig),
    Remote(RemoteConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Mock(MockConfig::default())
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

impl ApiConfig {
    /// Parses a JSON document, e.g.
    /// `{"backend":{"kind":"remote","baseUrl":"https://api.example.com"}}`.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `TASKBOARD_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let backend = match get(ENV_BACKEND).as_deref().map(str::to_ascii_lowercase) {
            None => BackendConfig::Mock(mock_from_lookup(&get)?),
            Some(kind) if kind == "mock" => BackendConfig::Mock(mock_from_lookup(&get)?),
            Some(kind) if kind == "remote" => {
                let base_url = get(ENV_REMOTE_URL).ok_or(ConfigError::MissingValue(ENV_REMOTE_URL))?;
                let timeout_ms = match get(ENV_REMOTE_TIMEOUT_MS) {
                    Some(value) => parse_u64(ENV_REMOTE_TIMEOUT_MS, &value)?,
                    None => DEFAULT_REMOTE_TIMEOUT_MS,
                };
                BackendConfig::Remote(RemoteConfig {
                    base_url,
                    timeout_ms,
                })
            }
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: ENV_BACKEND,
                    value: other,
                    reason: "expected mock|remote".to_string(),
                })
            }
        };

        let logging = match (get(ENV_LOG_LEVEL), get(ENV_LOG_DIR)) {
            (None, None) => None,
            (level, dir) => Some(LoggingConfig {
                level: level.unwrap_or_else(default_level),
                dir: dir.map(PathBuf::from),
            }),
        };

        let config = Self { backend, logging };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let BackendConfig::Remote(remote) = &self.backend {
            let url = remote.base_url.trim();
            if url.is_empty() {
                return Err(ConfigError::MissingValue("baseUrl"));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key: "baseUrl",
                    value: remote.base_url.clone(),
                    reason: "expected an http(s) URL".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn mock_from_lookup<G>(get: &G) -> Result<MockConfig, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let mut mock = MockConfig::default();
    if let Some(value) = get(ENV_LATENCY_MS) {
        mock.latency_ms = parse_u64(ENV_LATENCY_MS, &value)?;
    }
    if let Some(value) = get(ENV_ID_STRATEGY) {
        mock.id_strategy = value.parse().map_err(|err| ConfigError::InvalidValue {
            key: ENV_ID_STRATEGY,
            value: value.clone(),
            reason: format!("{err}"),
        })?;
    }
    if let Some(value) = get(ENV_SEED) {
        mock.seed = parse_bool(ENV_SEED, &value)?;
    }
    Ok(mock)
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: format!("{err}"),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected true|false".to_string(),
        }),
    }
}

fn default_latency_ms() -> u64 {
    DEFAULT_LATENCY.as_millis() as u64
}

fn default_seed() -> bool {
    true
}

fn default_remote_timeout_ms() -> u64 {
    DEFAULT_REMOTE_TIMEOUT_MS
}

fn default_level() -> String {
    crate::logging::default_log_level().to_string()
}
