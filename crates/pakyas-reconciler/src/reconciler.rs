// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Reconciler trait and the plan/converge driver shared by all resource kinds.

use async_trait::async_trait;
use pakyas_client::ResourceKind;
use tracing::{debug, info};

use crate::diff::UpdatePayload;
use crate::error::Result;
use crate::validation::ValidationError;

/// Outcome of reading a tracked resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome<S> {
    /// The resource exists; here is its current state.
    Live(S),
    /// The server no longer knows the resource; drop it from tracked state.
    Absent,
}

impl<S> ReadOutcome<S> {
    pub fn into_option(self) -> Option<S> {
        match self {
            ReadOutcome::Live(state) => Some(state),
            ReadOutcome::Absent => None,
        }
    }
}

/// What converging desired and tracked state would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan<U> {
    Create,
    NoOp,
    Update(U),
    /// Immutable fields changed: delete, then create.
    Replace { fields: Vec<&'static str> },
    Delete,
}

/// Reconciles one resource kind against the Pakyas API.
///
/// Implementations never retry; transient failures are handled by the
/// client's transport. Every method returns a whole new state or an error.
#[async_trait]
pub trait Reconciler: Send + Sync {
    /// Desired configuration.
    type Desired: Send + Sync;
    /// Tracked state built from server responses.
    type State: Clone + Send + Sync;
    /// Partial update payload.
    type Update: UpdatePayload + Send + Sync;

    /// Resource kind, used in errors and events.
    const KIND: ResourceKind;

    /// Server-assigned id of a tracked resource.
    fn state_id(state: &Self::State) -> &str;

    /// Check attribute constraints without touching the network.
    fn validate(&self, desired: &Self::Desired) -> std::result::Result<(), ValidationError>;

    /// Fields that cannot change in place and differ.
    fn replacement_fields(&self, desired: &Self::Desired, prior: &Self::State)
    -> Vec<&'static str>;

    /// Minimal update payload from `prior` to `desired`.
    fn diff(&self, desired: &Self::Desired, prior: &Self::State) -> Self::Update;

    /// Create the resource and return its state as read back.
    async fn create(&self, desired: &Self::Desired) -> Result<Self::State>;

    /// Refresh a tracked resource.
    async fn read(&self, id: &str) -> Result<ReadOutcome<Self::State>>;

    /// Apply the changed fields in place.
    async fn update(&self, desired: &Self::Desired, prior: &Self::State) -> Result<Self::State>;

    /// Delete the resource. A resource already gone is success.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Start tracking an existing resource by id.
    async fn import(&self, id: &str) -> Result<Self::State>;

    fn plan(
        &self,
        desired: Option<&Self::Desired>,
        prior: Option<&Self::State>,
    ) -> Plan<Self::Update> {
        match (desired, prior) {
            (None, None) => Plan::NoOp,
            (None, Some(_)) => Plan::Delete,
            (Some(_), None) => Plan::Create,
            (Some(desired), Some(prior)) => {
                let fields = self.replacement_fields(desired, prior);
                if !fields.is_empty() {
                    return Plan::Replace { fields };
                }
                let update = self.diff(desired, prior);
                if update.is_empty() {
                    Plan::NoOp
                } else {
                    Plan::Update(update)
                }
            }
        }
    }

    /// Drive the remote resource to `desired` and return the new tracked
    /// state, `None` when the resource ends up absent.
    ///
    /// Desired configuration is validated before any request. A prior state
    /// is then refreshed, so a resource deleted out of band is recreated.
    async fn converge(
        &self,
        desired: Option<&Self::Desired>,
        prior: Option<&Self::State>,
    ) -> Result<Option<Self::State>> {
        debug!(kind = %Self::KIND, "Converging resource");

        if let Some(desired) = desired {
            self.validate(desired)?;
        }

        let current = match prior {
            Some(prior) => self.read(Self::state_id(prior)).await?.into_option(),
            None => None,
        };

        match (desired, current) {
            (None, None) => Ok(None),
            (None, Some(current)) => {
                self.delete(Self::state_id(&current)).await?;
                Ok(None)
            }
            (Some(desired), None) => self.create(desired).await.map(Some),
            (Some(desired), Some(current)) => match self.plan(Some(desired), Some(&current)) {
                Plan::NoOp => Ok(Some(current)),
                Plan::Replace { fields } => {
                    info!(
                        kind = %Self::KIND,
                        id = %Self::state_id(&current),
                        fields = ?fields,
                        "Replacing resource"
                    );
                    self.delete(Self::state_id(&current)).await?;
                    self.create(desired).await.map(Some)
                }
                _ => self.update(desired, &current).await.map(Some),
            },
        }
    }
}
