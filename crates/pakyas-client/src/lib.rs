// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Pakyas API client
//!
//! Typed access to the Pakyas REST API for projects and checks.
//!
//! # Architecture
//!
//! - Transport: bearer authentication, JSON bodies, retry with exponential
//!   backoff and jitter for network failures, 429 and 5xx
//! - Session: organization context fetched once from `/api/v1/me`
//! - Accessors: create/get/update/delete for projects and checks, each write
//!   followed by a read so callers always see server state
//!
//! Every request honours the client's `CancellationToken`, both while in
//! flight and while waiting to retry.
//!
//! # Example
//!
//! ```no_run
//! use pakyas_client::{ClientConfig, CreateCheckRequest, NewProject, PakyasClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PakyasClient::connect(ClientConfig::from_env()?).await?;
//!
//! let project = client
//!     .create_project(NewProject::new("Production"))
//!     .await?;
//!
//! let check = client
//!     .create_check(
//!         CreateCheckRequest::new(&project.id, "Daily backup", "daily-backup", 86_400)
//!             .with_grace_seconds(3_600)
//!             .with_tags(["database", "backup"]),
//!     )
//!     .await?;
//! println!("Ping URL: {}", client.ping_url(&check.public_id));
//! # Ok(())
//! # }
//! ```

mod checks;
mod client;
mod config;
mod error;
mod normalize;
mod projects;
mod session;
mod transport;
mod types;

pub use client::PakyasClient;
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_PING_URL_BASE,
    DEFAULT_RETRY_BASE_DELAY, DEFAULT_TIMEOUT,
};
pub use error::{ApiError, ApiErrorKind, ClientError, Result};
pub use normalize::{normalize_description, normalize_tags};
pub use session::SessionContext;
pub use transport::RetryPolicy;
pub use types::{
    Check, CheckStatus, CreateCheckRequest, CreateProjectRequest, DeleteOutcome, Field,
    MeResponse, NewProject, Project, ResourceKind, UpdateCheckRequest, UpdateProjectRequest,
};

pub use tokio_util::sync::CancellationToken;
