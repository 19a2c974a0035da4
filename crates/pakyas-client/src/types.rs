// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wire types for the Pakyas REST API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Resource kinds managed through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Project,
    Check,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Project => "project",
            ResourceKind::Check => "check",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an accessor delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server accepted the delete.
    Deleted,
    /// The server answered 404; nothing left to delete.
    AlreadyAbsent,
}

/// Response of `GET /api/v1/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub organization_id: String,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub ping_url_base: String,
}

/// A Pakyas project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub org_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set once the project has been archived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

/// Server-computed check status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// No ping received yet.
    New,
    Up,
    Down,
    Late,
    Paused,
    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::New => "new",
            CheckStatus::Up => "up",
            CheckStatus::Down => "down",
            CheckStatus::Late => "late",
            CheckStatus::Paused => "paused",
            CheckStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Pakyas check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub slug: String,
    pub period_seconds: i64,
    #[serde(default)]
    pub grace_seconds: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub paused: bool,
    pub public_id: String,
    pub status: CheckStatus,
    pub created_at: DateTime<Utc>,
    /// Soft-delete marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A field in a partial update payload.
///
/// `Absent` fields are left out of the request entirely and the server keeps
/// its current value. `Null` asks the server to clear the field. `Value`
/// replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Borrow the value, if one is set.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    /// `None` maps to `Null`: an explicit clear, not "leave untouched".
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Value(v),
            None => Field::Null,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            Field::Null | Field::Absent => serializer.serialize_none(),
        }
    }
}

/// Clearing a description is sent as `""`; the API ignores `null` on update.
fn serialize_cleared_description<S: Serializer>(
    field: &Field<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match field {
        Field::Value(v) => serializer.serialize_str(v),
        Field::Null | Field::Absent => serializer.serialize_str(""),
    }
}

/// Caller-supplied fields of a new project.
///
/// The organization id comes from the client's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

impl NewProject {
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

/// Body of `POST /api/v1/projects`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProjectRequest {
    pub org_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /api/v1/projects/{id}`; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(
        skip_serializing_if = "Field::is_absent",
        serialize_with = "serialize_cleared_description"
    )]
    pub description: Field<String>,
}

impl UpdateProjectRequest {
    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_absent() && self.description.is_absent()
    }
}

/// Body of `POST /api/v1/checks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCheckRequest {
    pub project_id: String,
    pub name: String,
    pub slug: String,
    pub period_seconds: i64,
    pub grace_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub paused: bool,
}

impl CreateCheckRequest {
    /// Required fields; the rest default to the API's defaults.
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

/// Body of `PUT /api/v1/checks/{id}`; only present fields are sent.
///
/// `project_id` and `slug` are immutable and have no place here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateCheckRequest {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub period_seconds: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub grace_seconds: Field<i64>,
    #[serde(
        skip_serializing_if = "Field::is_absent",
        serialize_with = "serialize_cleared_description"
    )]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub tags: Field<Vec<String>>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub paused: Field<bool>,
}

impl UpdateCheckRequest {
    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.period_seconds.is_absent()
            && self.grace_seconds.is_absent()
            && self.description.is_absent()
            && self.tags.is_absent()
            && self.paused.is_absent()
    }
}
