// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Project reconciler.

use async_trait::async_trait;
use pakyas_client::{NewProject, PakyasClient, ResourceKind, UpdateProjectRequest};
use tracing::{debug, info, instrument};

use crate::diff::project_update;
use crate::error::{Operation, ReconcileError, Result};
use crate::model::{ProjectConfig, ProjectState};
use crate::reconciler::{ReadOutcome, Reconciler};
use crate::validation::{ValidationError, validate_project};

/// Reconciles `project` resources.
#[derive(Debug, Clone)]
pub struct ProjectReconciler {
    client: PakyasClient,
}

impl ProjectReconciler {
    pub fn new(client: PakyasClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PakyasClient {
        &self.client
    }
}

#[async_trait]
impl Reconciler for ProjectReconciler {
    type Desired = ProjectConfig;
    type State = ProjectState;
    type Update = UpdateProjectRequest;

    const KIND: ResourceKind = ResourceKind::Project;

    fn state_id(state: &ProjectState) -> &str {
        &state.id
    }

    fn validate(&self, desired: &ProjectConfig) -> std::result::Result<(), ValidationError> {
        validate_project(desired)
    }

    fn replacement_fields(
        &self,
        _desired: &ProjectConfig,
        _prior: &ProjectState,
    ) -> Vec<&'static str> {
        Vec::new()
    }

    fn diff(&self, desired: &ProjectConfig, prior: &ProjectState) -> UpdateProjectRequest {
        project_update(desired, prior)
    }

    #[instrument(skip(self, desired), fields(name = %desired.name))]
    async fn create(&self, desired: &ProjectConfig) -> Result<ProjectState> {
        self.validate(desired)?;

        let request = NewProject {
            name: desired.name.clone(),
            description: desired.description.clone(),
        };
        let project = self.client.create_project(request).await.map_err(|e| {
            ReconcileError::operation(Operation::Create, Self::KIND, None, e)
        })?;

        info!(id = %project.id, "Project created");
        Ok(ProjectState::from_remote(project))
    }

    #[instrument(skip(self))]
    async fn read(&self, id: &str) -> Result<ReadOutcome<ProjectState>> {
        match self.client.get_project(id).await {
            Ok(project) => Ok(ReadOutcome::Live(ProjectState::from_remote(project))),
            Err(e) if e.is_not_found() => {
                info!("Project not found, removing from state");
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
    async fn update(&self, desired: &ProjectConfig, prior: &ProjectState) -> Result<ProjectState> {
        self.validate(desired)?;

        let request = self.diff(desired, prior);
        if request.is_empty() {
            debug!("No changes");
            return Ok(prior.clone());
        }

        let project = self
            .client
            .update_project(&prior.id, &request)
            .await
            .map_err(|e| {
                ReconcileError::operation(Operation::Update, Self::KIND, Some(&prior.id), e)
            })?;

        Ok(ProjectState::from_remote(project))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_project(id)
            .await
            .map(|_| ())
            .map_err(|e| ReconcileError::operation(Operation::Delete, Self::KIND, Some(id), e))
    }

    #[instrument(skip(self))]
    async fn import(&self, id: &str) -> Result<ProjectState> {
        match self.client.get_project(id).await {
            Ok(project) => Ok(ProjectState::from_remote(project)),
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
