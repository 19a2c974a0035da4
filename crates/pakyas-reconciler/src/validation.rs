// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Attribute constraints checked before any network call.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::model::{CheckConfig, ProjectConfig};

static RE_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern is valid"));

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const PERIOD_MIN_SECONDS: i64 = 60;
pub const PERIOD_MAX_SECONDS: i64 = 2_592_000;
pub const GRACE_MAX_SECONDS: i64 = 86_400;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// All constraints violated by one desired configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {}", join_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Whether `field` has at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Collects violations across fields.
#[derive(Default)]
struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn name(&mut self, name: &str) {
        let len = name.chars().count();
        if len == 0 || len > NAME_MAX_CHARS {
            self.push(
                "name",
                format!("must be between 1 and {} characters", NAME_MAX_CHARS),
            );
        }
    }

    fn description(&mut self, description: Option<&str>) {
        if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_CHARS) {
            self.push(
                "description",
                format!("must be at most {} characters", DESCRIPTION_MAX_CHARS),
            );
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

pub fn validate_project(config: &ProjectConfig) -> Result<(), ValidationError> {
    let mut v = Validator::default();
    v.name(&config.name);
    v.description(config.description.as_deref());
    v.finish()
}

pub fn validate_check(config: &CheckConfig) -> Result<(), ValidationError> {
    let mut v = Validator::default();

    if config.project_id.is_empty() {
        v.push("project_id", "is required");
    }
    v.name(&config.name);
    if !RE_SLUG.is_match(&config.slug) {
        v.push(
            "slug",
            "must be lowercase alphanumeric with optional hyphens",
        );
    }
    if !(PERIOD_MIN_SECONDS..=PERIOD_MAX_SECONDS).contains(&config.period_seconds) {
        v.push(
            "period_seconds",
            format!(
                "must be between {} and {}",
                PERIOD_MIN_SECONDS, PERIOD_MAX_SECONDS
            ),
        );
    }
    if !(0..=GRACE_MAX_SECONDS).contains(&config.grace_seconds) {
        v.push(
            "grace_seconds",
            format!("must be between 0 and {}", GRACE_MAX_SECONDS),
        );
    }
    v.description(config.description.as_deref());

    v.finish()
}
