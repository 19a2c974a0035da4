// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! PakyasClient: the connected entry point for all accessors.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::session::SessionContext;
use crate::transport::Transport;

/// Client for the Pakyas REST API.
///
/// Construction performs one `GET /api/v1/me` and caches the organization
/// context for the client's lifetime. Clones share the HTTP connection pool
/// and the session; each clone may carry its own cancellation token.
///
/// Project and check operations live in the `projects` and `checks` modules
/// as inherent methods on this type.
#[derive(Clone)]
pub struct PakyasClient {
    transport: Arc<Transport>,
    session: Arc<SessionContext>,
    cancel: CancellationToken,
}

impl fmt::Debug for PakyasClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PakyasClient")
            .field("session", &self.session)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl PakyasClient {
    /// Validate the configuration and fetch the organization context.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        Self::connect_with_cancellation(config, CancellationToken::new()).await
    }

    /// Like [`connect`](Self::connect), scoped to `cancel` from the start.
    #[instrument(skip(config, cancel), fields(base_url = %config.base_url))]
    pub async fn connect_with_cancellation(
        config: ClientConfig,
        cancel: CancellationToken,
    ) -> Result<Self> {
        config.validate()?;

        let transport = Transport::new(&config)?;
        let session = SessionContext::fetch(&transport, &cancel)
            .await
            .map_err(|e| match e {
                ClientError::Cancelled => ClientError::Cancelled,
                other => ClientError::Session(Box::new(other)),
            })?;

        info!(
            organization_id = %session.organization_id,
            ping_url_base = %session.ping_url_base,
            "Connected to Pakyas API"
        );

        Ok(Self {
            transport: Arc::new(transport),
            session: Arc::new(session),
            cancel,
        })
    }

    /// Connect using [`ClientConfig::from_env`].
    pub async fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::connect(config).await
    }

    /// A clone whose requests are cancelled by `token`.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            session: Arc::clone(&self.session),
            cancel: token,
        }
    }

    /// Token scoping this client's requests.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cached organization context.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Organization id of the API key.
    pub fn org_id(&self) -> &str {
        &self.session.organization_id
    }

    /// Ping URL base, without trailing slash.
    pub fn ping_url_base(&self) -> &str {
        &self.session.ping_url_base
    }

    /// Ping URL for a check's public id.
    pub fn ping_url(&self, public_id: &str) -> String {
        self.session.ping_url(public_id)
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) fn cancel(&self) -> &CancellationToken {
        &self.cancel
    }
}
