//! Onboarding API client
//!
//! Fetches the signed-in user's onboarding answers from the profile service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use super::payload::OnboardingResponse;
use crate::build_info::BuildInfo;
use crate::config::ApiConfig;

/// Path of the onboarding endpoint, relative to the API base URL
pub const ONBOARDING_PATH: &str = "/onboarding/me";

/// Message used when the service does not explain a failure
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to load onboarding data";

/// Onboarding client error types
#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("Onboarding API base URL is not configured")]
    NotConfigured,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Onboarding service unreachable: {0}")]
    Communication(#[source] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Request { status: StatusCode, message: String },

    #[error("{message} (HTTP {status})")]
    Server { status: StatusCode, message: String },

    #[error("Invalid onboarding response: {0}")]
    Response(#[source] reqwest::Error),
}

/// Result type for onboarding operations
pub type OnboardingResult<T> = Result<T, OnboardingError>;

/// Anything that can produce the current user's onboarding answers
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch onboarding answers, optionally authenticating with `token`
    async fn fetch_onboarding(&self, token: Option<&str>) -> OnboardingResult<OnboardingResponse>;
}

/// Error body returned by the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the onboarding endpoint
pub struct OnboardingClient {
    client: Client,
    base_url: Option<String>,
    token: Option<String>,
}

impl OnboardingClient {
    /// Create a client from API configuration
    pub fn new(config: &ApiConfig) -> OnboardingResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(BuildInfo::current().user_agent())
            .build()
            .map_err(OnboardingError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Full URL of the onboarding endpoint, if a base URL is configured
    pub fn endpoint(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), ONBOARDING_PATH))
    }
}

#[async_trait]
impl ProfileSource for OnboardingClient {
    async fn fetch_onboarding(&self, token: Option<&str>) -> OnboardingResult<OnboardingResponse> {
        let url = self.endpoint().ok_or(OnboardingError::NotConfigured)?;

        let mut request = self.client.get(&url);
        if let Some(token) = token.or(self.token.as_deref()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Onboarding request failed");
            OnboardingError::Communication(e)
        })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            warn!(url = %url, status = %status, reason = %message, "Onboarding service returned an error");
            return Err(if status.is_client_error() {
                OnboardingError::Request { status, message }
            } else {
                OnboardingError::Server { status, message }
            });
        }

        let body = response
            .json::<OnboardingResponse>()
            .await
            .map_err(OnboardingError::Response)?;

        info!(url = %url, "Fetched onboarding profile");
        Ok(body)
    }
}
