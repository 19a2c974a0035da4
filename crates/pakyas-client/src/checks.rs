// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Check accessor.

use tracing::{debug, info, instrument};

use crate::client::PakyasClient;
use crate::error::{ClientError, Result};
use crate::normalize::{normalize_description, normalize_tags};
use crate::types::{
    Check, CreateCheckRequest, DeleteOutcome, Field, ResourceKind, UpdateCheckRequest,
};

const CHECKS_PATH: &str = "/api/v1/checks";

fn check_path(id: &str) -> String {
    format!("{}/{}", CHECKS_PATH, id)
}

impl PakyasClient {
    // =========================================================================
    // Checks
    // =========================================================================

    /// Create a check.
    ///
    /// Tags are sorted and an empty description is dropped before sending.
    /// Returns the check as read back after the write.
    #[instrument(
        skip(self, request),
        fields(project_id = %request.project_id, slug = %request.slug)
    )]
    pub async fn create_check(&self, mut request: CreateCheckRequest) -> Result<Check> {
        request.description = normalize_description(request.description);
        request.tags = normalize_tags(request.tags);

        let created: Check = match self
            .transport()
            .post(CHECKS_PATH, &request, self.cancel())
            .await
        {
            Ok(Some(created)) => created,
            Ok(None) => {
                return Err(ClientError::UnexpectedResponse(
                    "empty body from check create".to_string(),
                ));
            }
            Err(e) if e.is_conflict() => {
                return Err(ClientError::AlreadyExists {
                    kind: ResourceKind::Check,
                });
            }
            Err(e) => return Err(e),
        };

        info!(id = %created.id, public_id = %created.public_id, "Created check");
        self.get_check(&created.id).await
    }

    /// Fetch a check by id, with tags in sorted order.
    #[instrument(skip(self))]
    pub async fn get_check(&self, id: &str) -> Result<Check> {
        let mut check: Check = self
            .transport()
            .get(&check_path(id), self.cancel())
            .await?
            .ok_or_else(|| {
                ClientError::UnexpectedResponse(format!("empty body for check {}", id))
            })?;

        check.tags = normalize_tags(std::mem::take(&mut check.tags));
        Ok(check)
    }

    /// Apply a partial update, then return the check as read back.
    #[instrument(skip(self, request))]
    pub async fn update_check(&self, id: &str, request: &UpdateCheckRequest) -> Result<Check> {
        if request.is_empty() {
            debug!("Nothing to update");
            return self.get_check(id).await;
        }

        let request = match &request.tags {
            Field::Value(tags) => UpdateCheckRequest {
                tags: Field::Value(normalize_tags(tags.iter().cloned())),
                ..request.clone()
            },
            _ => request.clone(),
        };

        self.transport()
            .put(&check_path(id), &request, self.cancel())
            .await?;
        info!("Updated check");

        self.get_check(id).await
    }

    /// Soft-delete a check. A 404 is reported as [`DeleteOutcome::AlreadyAbsent`].
    #[instrument(skip(self))]
    pub async fn delete_check(&self, id: &str) -> Result<DeleteOutcome> {
        match self
            .transport()
            .delete(&check_path(id), self.cancel())
            .await
        {
            Ok(()) => {
                info!("Deleted check");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.is_not_found() => {
                debug!("Check already absent");
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(e) => Err(e),
        }
    }
}
