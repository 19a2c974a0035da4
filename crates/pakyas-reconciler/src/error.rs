// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for pakyas-reconciler.

use std::fmt;

use pakyas_client::{ClientError, ResourceKind};
use thiserror::Error;

use crate::validation::ValidationError;

/// Result type using ReconcileError.
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Reconciler operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn display_id(id: &Option<String>) -> String {
    id.as_deref().map(|id| format!(" {}", id)).unwrap_or_default()
}

/// Errors surfaced by reconcilers.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Desired configuration violates attribute constraints.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Terminal failure of one operation.
    #[error("failed to {operation} {kind}{}: {source}", display_id(.id))]
    Operation {
        operation: Operation,
        kind: ResourceKind,
        /// Unknown for create until the server assigns one.
        id: Option<String>,
        #[source]
        source: ClientError,
    },

    /// Immutable fields changed; the resource must be destroyed and recreated.
    #[error("{kind} {id} requires replacement: {} cannot be changed in place", .fields.join(", "))]
    RequiresReplacement {
        kind: ResourceKind,
        id: String,
        fields: Vec<&'static str>,
    },

    /// Import named an id the server does not know.
    #[error("cannot import {kind} {id}: not found")]
    ImportNotFound { kind: ResourceKind, id: String },
}

impl ReconcileError {
    pub(crate) fn operation(
        operation: Operation,
        kind: ResourceKind,
        id: Option<&str>,
        source: ClientError,
    ) -> Self {
        ReconcileError::Operation {
            operation,
            kind,
            id: id.map(str::to_string),
            source,
        }
    }

    /// The client error behind an operation failure.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            ReconcileError::Operation { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Create failed because the resource already exists remotely.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self.client_error(),
            Some(ClientError::AlreadyExists { .. })
        )
    }
}
