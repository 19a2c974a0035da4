// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Organization context fetched once per client.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::DEFAULT_PING_URL_BASE;
use crate::error::{ClientError, Result};
use crate::transport::Transport;
use crate::types::MeResponse;

const ME_PATH: &str = "/api/v1/me";

/// Identity of the organization the API key belongs to.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub organization_id: String,
    pub organization_name: String,
    pub scopes: Vec<String>,
    /// Base for ping URLs, without trailing slash.
    pub ping_url_base: String,
}

impl SessionContext {
    /// Build the context from a `/api/v1/me` response.
    ///
    /// An empty ping URL base falls back to the public default.
    pub fn from_me(me: MeResponse) -> Self {
        let trimmed = me.ping_url_base.trim_end_matches('/');
        let ping_url_base = if trimmed.is_empty() {
            warn!(
                fallback = DEFAULT_PING_URL_BASE,
                "API did not return a ping URL base, using default"
            );
            DEFAULT_PING_URL_BASE.to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            organization_id: me.organization_id,
            organization_name: me.organization_name,
            scopes: me.scopes,
            ping_url_base,
        }
    }

    /// Ping URL for a check with the given public id.
    pub fn ping_url(&self, public_id: &str) -> String {
        format!("{}/{}", self.ping_url_base, public_id)
    }

    pub(crate) async fn fetch(transport: &Transport, cancel: &CancellationToken) -> Result<Self> {
        debug!("Fetching organization context");

        let me: MeResponse = transport
            .get(ME_PATH, cancel)
            .await?
            .ok_or_else(|| {
                ClientError::UnexpectedResponse(format!("empty body from {}", ME_PATH))
            })?;

        if me.organization_id.is_empty() {
            return Err(ClientError::UnexpectedResponse(
                "organization_id missing from /api/v1/me".to_string(),
            ));
        }

        Ok(Self::from_me(me))
    }
}
