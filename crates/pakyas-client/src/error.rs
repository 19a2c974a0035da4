// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for pakyas-client.

use serde::Deserialize;
use thiserror::Error;

use crate::types::ResourceKind;

/// Result type using ClientError.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Classification of an HTTP error status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401 Unauthorized.
    Unauthorized,
    /// 403 Forbidden.
    Forbidden,
    /// 404 Not Found.
    NotFound,
    /// 409 Conflict.
    Conflict,
    /// 429 or any 5xx; the transport retries these.
    Retryable,
    /// Any other 4xx.
    Terminal,
}

impl ApiErrorKind {
    /// Classify an HTTP status code (expected to be >= 400).
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            409 => ApiErrorKind::Conflict,
            429 => ApiErrorKind::Retryable,
            s if s >= 500 => ApiErrorKind::Retryable,
            _ => ApiErrorKind::Terminal,
        }
    }
}

/// An HTTP error response returned by the Pakyas API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pakyas API error (status {status}): {}", .message.as_deref().unwrap_or(&self.body))]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Message extracted from the JSON body, if any.
    pub message: Option<String>,
    /// Raw response body.
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build an error from a status and raw body, extracting the `error` or
    /// `message` field when the body is JSON.
    pub fn from_response(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| {
                parsed
                    .error
                    .filter(|s| !s.is_empty())
                    .or(parsed.message.filter(|s| !s.is_empty()))
            });

        Self {
            status,
            message,
            body,
        }
    }

    /// Status classification.
    pub fn kind(&self) -> ApiErrorKind {
        ApiErrorKind::from_status(self.status)
    }

    /// Whether the transport should retry this response.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ApiErrorKind::Retryable
    }
}

/// Errors that can occur when talking to the Pakyas API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure (connect, I/O, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a status >= 400.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Every attempt failed; wraps the last observed error.
    #[error("max retries exceeded after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<ClientError>,
    },

    /// Create hit a conflict: the resource already exists remotely.
    #[error("{kind} already exists, import it to manage it")]
    AlreadyExists { kind: ResourceKind },

    /// The caller's cancellation token fired.
    #[error("operation cancelled")]
    Cancelled,

    /// Request or response JSON could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unexpected response from server.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Session context could not be established during construction.
    #[error("failed to fetch organization context: {0}")]
    Session(#[source] Box<ClientError>),
}

impl ClientError {
    /// The API error behind this error, looking through retry exhaustion.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            ClientError::RetriesExhausted { source, .. } => source.api_error(),
            _ => None,
        }
    }

    /// Status classification, if this is an API error.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        self.api_error().map(ApiError::kind)
    }

    /// HTTP 404.
    pub fn is_not_found(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::NotFound)
    }

    /// HTTP 409.
    pub fn is_conflict(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::Conflict)
    }

    /// HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::Unauthorized)
    }

    /// HTTP 403.
    pub fn is_forbidden(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::Forbidden)
    }

    /// Whether a single attempt failing with this error may be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Api(err) => err.is_retryable(),
            _ => false,
        }
    }
}
