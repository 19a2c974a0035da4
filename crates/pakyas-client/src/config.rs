// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the Pakyas client.

use std::env;
use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ClientError, Result};

/// Default Pakyas API URL.
pub const DEFAULT_BASE_URL: &str = "https://api.pakyas.com";
/// Ping URL base used when `/api/v1/me` does not return one.
pub const DEFAULT_PING_URL_BASE: &str = "https://ping.pakyas.com";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;
/// Default base delay for exponential backoff.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Configuration for [`PakyasClient`](crate::PakyasClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent as a bearer token.
    pub api_key: SecretString,
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Timeout for a single HTTP attempt.
    pub request_timeout: Duration,
    /// Retries after the first attempt (total attempts = max_retries + 1).
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub retry_base_delay: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_base_delay", &self.retry_base_delay)
            .finish()
    }
}

fn default_user_agent() -> String {
    concat!("pakyas-client/", env!("CARGO_PKG_VERSION")).to_string()
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

impl ClientConfig {
    /// Create a configuration with the given API key and default values.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            request_timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PAKYAS_API_KEY`: API key (required)
    /// - `PAKYAS_API_URL`: API base URL (default: "https://api.pakyas.com")
    /// - `PAKYAS_REQUEST_TIMEOUT_MS`: Per-request timeout (default: 15000)
    /// - `PAKYAS_MAX_RETRIES`: Retries after the first attempt (default: 5)
    /// - `PAKYAS_RETRY_BASE_DELAY_MS`: Backoff base delay (default: 1000)
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("PAKYAS_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ClientError::Config(
                    "missing API key: set PAKYAS_API_KEY or configure api_key".to_string(),
                )
            })?;

        let base_url = env::var("PAKYAS_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout_ms: u64 = env::var("PAKYAS_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "15000".to_string())
            .parse()
            .map_err(|e| ClientError::Config(format!("invalid PAKYAS_REQUEST_TIMEOUT_MS: {}", e)))?;

        let max_retries: u32 = env::var("PAKYAS_MAX_RETRIES")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|e| ClientError::Config(format!("invalid PAKYAS_MAX_RETRIES: {}", e)))?;

        let retry_base_delay_ms: u64 = env::var("PAKYAS_RETRY_BASE_DELAY_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .map_err(|e| {
                ClientError::Config(format!("invalid PAKYAS_RETRY_BASE_DELAY_MS: {}", e))
            })?;

        Ok(Self::new(api_key)
            .with_base_url(base_url)
            .with_request_timeout(Duration::from_millis(request_timeout_ms))
            .with_max_retries(max_retries)
            .with_retry_base_delay(Duration::from_millis(retry_base_delay_ms)))
    }

    /// Set the API base URL. Trailing slashes are stripped.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(url.as_ref());
        self
    }

    /// Set the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the backoff base delay.
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Check the configuration before any request is made.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ClientError::Config("API key must not be empty".to_string()));
        }
        if self.base_url.is_empty() {
            return Err(ClientError::Config("base URL must not be empty".to_string()));
        }
        Ok(())
    }
}
