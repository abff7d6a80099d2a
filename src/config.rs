//! Configuration
//!
//! Settings are read from `NUTRIGOAL_*` environment variables at startup.

use thiserror::Error;

use crate::profile::AgeMethod;

pub const ENV_API_BASE_URL: &str = "NUTRIGOAL_API_BASE_URL";
pub const ENV_API_TOKEN: &str = "NUTRIGOAL_API_TOKEN";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "NUTRIGOAL_REQUEST_TIMEOUT_MS";
pub const ENV_AGE_METHOD: &str = "NUTRIGOAL_AGE_METHOD";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Configuration error types
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must be 'epoch' or 'calendar', got {value:?}")]
    InvalidAgeMethod { var: &'static str, value: String },
}

/// Profile service settings
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the profile service; fetching is disabled when unset
    pub base_url: Option<String>,
    /// Bearer token sent with requests
    pub token: Option<String>,
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

/// Service configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub age_method: AgeMethod,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let request_timeout_ms = match non_empty(ENV_REQUEST_TIMEOUT_MS) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidTimeout {
                var: ENV_REQUEST_TIMEOUT_MS,
                value,
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        let age_method = match non_empty(ENV_AGE_METHOD) {
            Some(value) => AgeMethod::from_str(&value).ok_or(ConfigError::InvalidAgeMethod {
                var: ENV_AGE_METHOD,
                value,
            })?,
            None => AgeMethod::default(),
        };

        Ok(Self {
            api: ApiConfig {
                base_url: non_empty(ENV_API_BASE_URL),
                token: non_empty(ENV_API_TOKEN),
                request_timeout_ms,
            },
            age_method,
        })
    }
}
