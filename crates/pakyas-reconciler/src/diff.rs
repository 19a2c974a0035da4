// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Minimal update payloads from desired configuration and observed state.
//!
//! A field is present in the payload iff its normalized desired value differs
//! from the previously observed one.

use pakyas_client::{
    Field, UpdateCheckRequest, UpdateProjectRequest, normalize_description, normalize_tags,
};

use crate::model::{CheckConfig, CheckState, ProjectConfig, ProjectState};

/// Update payloads that can report whether they would change anything.
pub trait UpdatePayload {
    fn is_empty(&self) -> bool;
}

impl UpdatePayload for UpdateProjectRequest {
    fn is_empty(&self) -> bool {
        UpdateProjectRequest::is_empty(self)
    }
}

impl UpdatePayload for UpdateCheckRequest {
    fn is_empty(&self) -> bool {
        UpdateCheckRequest::is_empty(self)
    }
}

fn changed<T: PartialEq>(desired: T, observed: &T) -> Field<T> {
    if &desired == observed {
        Field::Absent
    } else {
        Field::Value(desired)
    }
}

/// `Null` when a set description is cleared.
fn description_change(desired: &Option<String>, observed: &Option<String>) -> Field<String> {
    let desired = normalize_description(desired.clone());
    if &desired == observed {
        Field::Absent
    } else {
        Field::from(desired)
    }
}

pub fn project_update(desired: &ProjectConfig, observed: &ProjectState) -> UpdateProjectRequest {
    UpdateProjectRequest {
        name: changed(desired.name.clone(), &observed.name),
        description: description_change(&desired.description, &observed.description),
    }
}

pub fn check_update(desired: &CheckConfig, observed: &CheckState) -> UpdateCheckRequest {
    UpdateCheckRequest {
        name: changed(desired.name.clone(), &observed.name),
        period_seconds: changed(desired.period_seconds, &observed.period_seconds),
        grace_seconds: changed(desired.grace_seconds, &observed.grace_seconds),
        description: description_change(&desired.description, &observed.description),
        tags: changed(normalize_tags(desired.tags.iter().cloned()), &observed.tags),
        paused: changed(desired.paused, &observed.paused),
    }
}

/// Immutable check fields whose desired value differs from the observed one.
pub fn check_replacement_fields(desired: &CheckConfig, observed: &CheckState) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if desired.project_id != observed.project_id {
        fields.push("project_id");
    }
    if desired.slug != observed.slug {
        fields.push("slug");
    }
    fields
}
