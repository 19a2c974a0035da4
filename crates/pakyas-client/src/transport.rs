// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Authenticated HTTP execution with retry and backoff.
//!
//! One call to [`Transport::execute`] is one logical request: it may perform
//! several attempts, but all retry state lives on that call's stack.

use std::time::Duration;

use rand::Rng;
use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, Result};

/// Retry schedule for a single logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further retry.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Total attempts including the first one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before `attempt` without jitter: zero for attempt 0, then
    /// `base * 2^(attempt - 1)`.
    pub fn base_backoff(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        self.base_delay.saturating_mul(factor)
    }

    /// Delay before `attempt` with uniform jitter in `[0, delay / 2)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let delay = self.base_backoff(attempt);
        let half_nanos = u64::try_from((delay / 2).as_nanos()).unwrap_or(u64::MAX);
        if half_nanos == 0 {
            return delay;
        }
        let jitter = rand::thread_rng().gen_range(0..half_nanos);
        delay.saturating_add(Duration::from_nanos(jitter))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_MAX_RETRIES,
            crate::config::DEFAULT_RETRY_BASE_DELAY,
        )
    }
}

/// HTTP transport shared by all accessors of one client.
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    user_agent: String,
    retry: RetryPolicy,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            user_agent: config.user_agent.clone(),
            retry: RetryPolicy::new(config.max_retries, config.retry_base_delay),
        })
    }

    /// GET `path` and decode the body, if any.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let bytes = self.execute(Method::GET, path, None, cancel).await?;
        decode(&bytes)
    }

    /// POST a JSON body to `path` and decode the body, if any.
    pub(crate) async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        let bytes = self
            .execute(Method::POST, path, Some(payload), cancel)
            .await?;
        decode(&bytes)
    }

    /// PUT a JSON body to `path`, discarding the response body.
    pub(crate) async fn put<B>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body)?;
        self.execute(Method::PUT, path, Some(payload), cancel).await?;
        Ok(())
    }

    /// DELETE `path`, discarding the response body.
    pub(crate) async fn delete(&self, path: &str, cancel: &CancellationToken) -> Result<()> {
        self.execute(Method::DELETE, path, None, cancel).await?;
        Ok(())
    }

    /// Run one logical request, retrying network failures, 429 and 5xx.
    ///
    /// Returns the raw body of the first successful response.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_error = None;

        for attempt in 0..self.retry.max_attempts() {
            if attempt > 0 {
                let delay = self.retry.backoff(attempt);
                debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    method = %method,
                    url = %url,
                    "Retrying request"
                );

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                result = self.attempt(method.clone(), &url, body.as_deref()) => result,
            };

            match result {
                Ok(bytes) => return Ok(bytes),
                Err(err) if err.is_retryable() => {
                    warn!(
                        attempt,
                        method = %method,
                        url = %url,
                        error = %err,
                        "Request failed with retryable error"
                    );
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        let source = last_error.unwrap_or_else(|| {
            ClientError::UnexpectedResponse("request was never attempted".to_string())
        });
        Err(ClientError::RetriesExhausted {
            attempts: self.retry.max_attempts(),
            source: Box::new(source),
        })
    }

    /// A single HTTP round trip.
    async fn attempt(&self, method: Method, url: &str, body: Option<&[u8]>) -> Result<Vec<u8>> {
        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(self.api_key.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent);

        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        if status >= 400 {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ApiError::from_response(status, body).into());
        }

        Ok(bytes.to_vec())
    }
}

/// Decode a JSON body; an empty body decodes to `None`.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>> {
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(bytes)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_zero_has_no_delay() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.base_backoff(0), Duration::ZERO);
        assert_eq!(policy.backoff(0), Duration::ZERO);
    }

    #[test]
    fn test_base_backoff_doubles() {
        let policy = RetryPolicy::new(5, Duration::from_secs(1));
        let expected = [1, 2, 4, 8, 16];
        for (i, secs) in expected.iter().enumerate() {
            assert_eq!(policy.base_backoff(i as u32 + 1), Duration::from_secs(*secs));
        }
    }

    #[test]
    fn test_backoff_within_jitter_bounds() {
        let policy = RetryPolicy::new(5, Duration::from_secs(1));
        for attempt in 1..=5 {
            let floor = policy.base_backoff(attempt);
            let ceiling = floor + floor / 2;
            for _ in 0..50 {
                let delay = policy.backoff(attempt);
                assert!(delay >= floor, "attempt {attempt}: {delay:?} < {floor:?}");
                assert!(delay < ceiling, "attempt {attempt}: {delay:?} >= {ceiling:?}");
            }
        }
    }

    #[test]
    fn test_zero_base_delay_never_panics() {
        let policy = RetryPolicy::new(5, Duration::ZERO);
        assert_eq!(policy.backoff(3), Duration::ZERO);
    }

    #[test]
    fn test_large_attempt_saturates() {
        let policy = RetryPolicy::new(u32::MAX, Duration::from_secs(1));
        assert_eq!(policy.max_attempts(), u32::MAX);
        let _ = policy.backoff(200);
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.max_attempts(), 6);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_decode_empty_body() {
        let decoded: Option<serde_json::Value> = decode(b"").unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode::<serde_json::Value>(b"not json").unwrap_err();
        assert!(matches!(err, ClientError::Serialization(_)));
    }
}
