// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Pakyas reconciler
//!
//! Drives Pakyas projects and checks to a desired configuration. Each
//! resource kind has a [`Reconciler`] offering create, read, update, delete
//! and import, plus [`Reconciler::plan`] and [`Reconciler::converge`] for
//! callers that only hold desired configuration and last-known state.
//!
//! Tracked state is always derived from what the server returns, with tags
//! sorted and empty descriptions unset, so a second run against unchanged
//! configuration plans nothing.
//!
//! # Example
//!
//! ```no_run
//! use pakyas_client::{ClientConfig, PakyasClient};
//! use pakyas_reconciler::{CheckConfig, CheckReconciler, Reconciler};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PakyasClient::connect(ClientConfig::from_env()?).await?;
//! let checks = CheckReconciler::new(client);
//!
//! let desired = CheckConfig::new("prj-1", "Daily backup", "daily-backup", 86_400)
//!     .with_tags(["database", "backup"]);
//! let state = checks.converge(Some(&desired), None).await?;
//!
//! // Nothing changed, so the second pass only reads.
//! let state = checks.converge(Some(&desired), state.as_ref()).await?;
//! println!("{:?}", state.map(|s| s.ping_url));
//! # Ok(())
//! # }
//! ```

mod check;
mod diff;
mod error;
mod model;
mod project;
mod reconciler;
mod validation;

pub use check::CheckReconciler;
pub use diff::{UpdatePayload, check_replacement_fields, check_update, project_update};
pub use error::{Operation, ReconcileError, Result};
pub use model::{CheckConfig, CheckState, ProjectConfig, ProjectState};
pub use project::ProjectReconciler;
pub use reconciler::{Plan, ReadOutcome, Reconciler};
pub use validation::{FieldError, ValidationError, validate_check, validate_project};
