// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Check reconciler.

use async_trait::async_trait;
use pakyas_client::{CreateCheckRequest, PakyasClient, ResourceKind, UpdateCheckRequest};
use tracing::{debug, info, instrument};

use crate::diff::{check_replacement_fields, check_update};
use crate::error::{Operation, ReconcileError, Result};
use crate::model::{CheckConfig, CheckState};
use crate::reconciler::{ReadOutcome, Reconciler};
use crate::validation::{ValidationError, validate_check};

/// Reconciles `check` resources.
///
/// `project_id` and `slug` are fixed at creation; [`Reconciler::update`]
/// rejects changes to them with [`ReconcileError::RequiresReplacement`].
#[derive(Debug, Clone)]
pub struct CheckReconciler {
    client: PakyasClient,
}

impl CheckReconciler {
    pub fn new(client: PakyasClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PakyasClient {
        &self.client
    }

    fn to_state(&self, check: pakyas_client::Check) -> CheckState {
        CheckState::from_remote(check, self.client.session())
    }
}

fn create_request(desired: &CheckConfig) -> CreateCheckRequest {
    let mut request = CreateCheckRequest::new(
        &desired.project_id,
        &desired.name,
        &desired.slug,
        desired.period_seconds,
    )
    .with_grace_seconds(desired.grace_seconds)
    .with_tags(desired.tags.iter().cloned())
    .with_paused(desired.paused);
    request.description = desired.description.clone();
    request
}

#[async_trait]
impl Reconciler for CheckReconciler {
    type Desired = CheckConfig;
    type State = CheckState;
    type Update = UpdateCheckRequest;

    const KIND: ResourceKind = ResourceKind::Check;

    fn state_id(state: &CheckState) -> &str {
        &state.id
    }

    fn validate(&self, desired: &CheckConfig) -> std::result::Result<(), ValidationError> {
        validate_check(desired)
    }

    fn replacement_fields(&self, desired: &CheckConfig, prior: &CheckState) -> Vec<&'static str> {
        check_replacement_fields(desired, prior)
    }

    fn diff(&self, desired: &CheckConfig, prior: &CheckState) -> UpdateCheckRequest {
        check_update(desired, prior)
    }

    #[instrument(
        skip(self, desired),
        fields(project_id = %desired.project_id, slug = %desired.slug)
    )]
    async fn create(&self, desired: &CheckConfig) -> Result<CheckState> {
        self.validate(desired)?;

        let check = self
            .client
            .create_check(create_request(desired))
            .await
            .map_err(|e| ReconcileError::operation(Operation::Create, Self::KIND, None, e))?;

        info!(id = %check.id, public_id = %check.public_id, "Check created");
        Ok(self.to_state(check))
    }

    #[instrument(skip(self))]
    async fn read(&self, id: &str) -> Result<ReadOutcome<CheckState>> {
        match self.client.get_check(id).await {
            Ok(check) => Ok(ReadOutcome::Live(self.to_state(check))),
            Err(e) if e.is_not_found() => {
                info!("Check not found, removing from state");
                Ok(ReadOutcome::Absent)
            }
            Err(e) => Err(ReconcileError::operation(
                Operation::Read,
                Self::KIND,
                Some(id),
                e,
            )),
        }
    }

    #[instrument(skip(self, desired, prior), fields(id = %prior.id))]
    async fn update(&self, desired: &CheckConfig, prior: &CheckState) -> Result<CheckState> {
        self.validate(desired)?;

        let fields = self.replacement_fields(desired, prior);
        if !fields.is_empty() {
            return Err(ReconcileError::RequiresReplacement {
                kind: Self::KIND,
                id: prior.id.clone(),
                fields,
            });
        }

        let request = self.diff(desired, prior);
        if request.is_empty() {
            debug!("No changes");
            return Ok(prior.clone());
        }

        let check = self
            .client
            .update_check(&prior.id, &request)
            .await
            .map_err(|e| {
                ReconcileError::operation(Operation::Update, Self::KIND, Some(&prior.id), e)
            })?;

        Ok(self.to_state(check))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_check(id)
            .await
            .map(|_| ())
            .map_err(|e| ReconcileError::operation(Operation::Delete, Self::KIND, Some(id), e))
    }

    #[instrument(skip(self))]
    async fn import(&self, id: &str) -> Result<CheckState> {
        match self.client.get_check(id).await {
            Ok(check) => Ok(self.to_state(check)),
            Err(e) if e.is_not_found() => Err(ReconcileError::ImportNotFound {
                kind: Self::KIND,
                id: id.to_string(),
            }),
            Err(e) => Err(ReconcileError::operation(
                Operation::Import,
                Self::KIND,
                Some(id),
                e,
            )),
        }
    }
}
