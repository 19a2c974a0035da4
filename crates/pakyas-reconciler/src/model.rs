// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Desired configuration and tracked state for each resource kind.
//!
//! Tracked state is always built from a server response through
//! `from_remote`, so create, read and update yield identical values for the
//! same remote resource.

use chrono::{DateTime, Utc};
use pakyas_client::{
    Check, CheckStatus, Project, SessionContext, normalize_description, normalize_tags,
};
use serde::{Deserialize, Serialize};

/// Desired configuration of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Last observed state of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectState {
    pub id: String,
    pub org_id: String,
    pub name: String,
    /// `None` when unset; never an empty string.
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl ProjectState {
    pub fn from_remote(project: Project) -> Self {
        Self {
            id: project.id,
            org_id: project.org_id,
            name: project.name,
            description: normalize_description(project.description),
            created_at: project.created_at,
            updated_at: project.updated_at,
            archived_at: project.archived_at,
        }
    }
}

/// Desired configuration of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Changing this forces replacement.
    pub project_id: String,
    pub name: String,
    /// Changing this forces replacement.
    pub slug: String,
    pub period_seconds: i64,
    #[serde(default)]
    pub grace_seconds: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub paused: bool,
}

impl CheckConfig {
    pub fn new(
        project_id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        period_seconds: i64,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            slug: slug.into(),
            period_seconds,
            grace_seconds: 0,
            description: None,
            tags: Vec::new(),
            paused: false,
        }
    }

    pub fn with_grace_seconds(mut self, grace_seconds: i64) -> Self {
        self.grace_seconds = grace_seconds;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }
}

/// Last observed state of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckState {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub slug: String,
    pub period_seconds: i64,
    pub grace_seconds: i64,
    pub description: Option<String>,
    /// Sorted, duplicate-free.
    pub tags: Vec<String>,
    pub paused: bool,
    pub public_id: String,
    /// `{ping_url_base}/{public_id}`.
    pub ping_url: String,
    pub status: CheckStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CheckState {
    pub fn from_remote(check: Check, session: &SessionContext) -> Self {
        let ping_url = session.ping_url(&check.public_id);
        Self {
            id: check.id,
            project_id: check.project_id,
            name: check.name,
            slug: check.slug,
            period_seconds: check.period_seconds,
            grace_seconds: check.grace_seconds,
            description: normalize_description(check.description),
            tags: normalize_tags(check.tags),
            paused: check.paused,
            public_id: check.public_id,
            ping_url,
            status: check.status,
            created_at: check.created_at,
            deleted_at: check.deleted_at,
        }
    }
}
