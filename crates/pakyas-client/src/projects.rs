// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Project accessor.

use tracing::{debug, info, instrument};

use crate::client::PakyasClient;
use crate::error::{ClientError, Result};
use crate::normalize::normalize_description;
use crate::types::{
    CreateProjectRequest, DeleteOutcome, NewProject, Project, ResourceKind, UpdateProjectRequest,
};

const PROJECTS_PATH: &str = "/api/v1/projects";

fn project_path(id: &str) -> String {
    format!("{}/{}", PROJECTS_PATH, id)
}

impl PakyasClient {
    // =========================================================================
    // Projects
    // =========================================================================

    /// Create a project in the session's organization.
    ///
    /// Returns the project as read back after the write. A 409 becomes
    /// [`ClientError::AlreadyExists`] and no read is attempted.
    #[instrument(skip(self, project), fields(name = %project.name))]
    pub async fn create_project(&self, project: NewProject) -> Result<Project> {
        let request = CreateProjectRequest {
            org_id: self.org_id().to_string(),
            name: project.name,
            description: normalize_description(project.description),
        };

        let created: Project = match self
            .transport()
            .post(PROJECTS_PATH, &request, self.cancel())
            .await
        {
            Ok(Some(created)) => created,
            Ok(None) => {
                return Err(ClientError::UnexpectedResponse(
                    "empty body from project create".to_string(),
                ));
            }
            Err(e) if e.is_conflict() => {
                return Err(ClientError::AlreadyExists {
                    kind: ResourceKind::Project,
                });
            }
            Err(e) => return Err(e),
        };

        info!(id = %created.id, "Created project");
        self.get_project(&created.id).await
    }

    /// Fetch a project by id.
    #[instrument(skip(self))]
    pub async fn get_project(&self, id: &str) -> Result<Project> {
        self.transport()
            .get(&project_path(id), self.cancel())
            .await?
            .ok_or_else(|| {
                ClientError::UnexpectedResponse(format!("empty body for project {}", id))
            })
    }

    /// Apply a partial update, then return the project as read back.
    #[instrument(skip(self, request))]
    pub async fn update_project(
        &self,
        id: &str,
        request: &UpdateProjectRequest,
    ) -> Result<Project> {
        if request.is_empty() {
            debug!("Nothing to update");
        } else {
            self.transport()
                .put(&project_path(id), request, self.cancel())
                .await?;
            info!("Updated project");
        }

        self.get_project(id).await
    }

    /// Archive a project. A 404 is reported as [`DeleteOutcome::AlreadyAbsent`].
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: &str) -> Result<DeleteOutcome> {
        match self
            .transport()
            .delete(&project_path(id), self.cancel())
            .await
        {
            Ok(()) => {
                info!("Archived project");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.is_not_found() => {
                debug!("Project already absent");
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(e) => Err(e),
        }
    }
}
