//! Team member store: synchronized collection view plus mutations.

use crate::error::MutationError;
use crate::resource::{FetchOperation, Resource, ResourceState};
use async_trait::async_trait;
use sprintdeck_client::{ApiClient, ApiError, TeamMemberGateway};
use sprintdeck_core::{NewTeamMember, TeamMember, TeamMemberId};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

struct ListTeamMembers {
    gateway: Arc<dyn TeamMemberGateway>,
}

#[async_trait]
impl FetchOperation<TeamMember> for ListTeamMembers {
    async fn fetch(&self) -> Result<Vec<TeamMember>, ApiError> {
        self.gateway.list().await
    }
}

/// Synchronized view of the team member collection.
///
/// Every successful mutation invalidates the cached view; the refetch is
/// in flight when the mutation returns. Mutation failures are normalized
/// and re-raised to the caller, never swallowed.
pub struct TeamMemberStore {
    gateway: Arc<dyn TeamMemberGateway>,
    resource: Resource<TeamMember>,
}

impl TeamMemberStore {
    /// Build a store over any gateway implementation.
    pub fn new(gateway: Arc<dyn TeamMemberGateway>) -> Self {
        let resource = Resource::new(Arc::new(ListTeamMembers {
            gateway: gateway.clone(),
        }));
        Self { gateway, resource }
    }

    /// Build a store backed by the live API client.
    pub fn from_client(api: &ApiClient) -> Self {
        Self::new(Arc::new(api.team_members()))
    }

    /// Fetch the collection and wait for the result to settle.
    pub async fn load(&self) {
        self.resource.refetch().await;
    }

    /// Manually re-fetch, outside the mutation-driven cycle.
    pub async fn refetch(&self) {
        self.resource.refetch().await;
    }

    /// Current collection state.
    pub fn state(&self) -> ResourceState<TeamMember> {
        self.resource.state()
    }

    /// Subscribe to collection state changes.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<TeamMember>> {
        self.resource.subscribe()
    }

    /// Snapshot rows; empty before the first successful load.
    pub fn members(&self) -> Vec<TeamMember> {
        self.resource.state().data.unwrap_or_default()
    }

    /// Refetch whenever the watched dependency changes value.
    pub fn watch_dependency<D>(&self, rx: watch::Receiver<D>) -> JoinHandle<()>
    where
        D: Clone + PartialEq + Send + Sync + 'static,
    {
        self.resource.watch_dependency(rx)
    }

    /// Create a team member.
    pub async fn create(&self, draft: NewTeamMember) -> Result<TeamMember, MutationError> {
        match self.gateway.create(&draft).await {
            Ok(member) => {
                self.resource.invalidate();
                Ok(member)
            }
            Err(err) => Err(MutationError::normalize(
                err,
                "Failed to create team member",
            )),
        }
    }

    /// Update a team member.
    pub async fn update(
        &self,
        id: &TeamMemberId,
        draft: NewTeamMember,
    ) -> Result<TeamMember, MutationError> {
        match self.gateway.update(id, &draft).await {
            Ok(member) => {
                self.resource.invalidate();
                Ok(member)
            }
            Err(err) => Err(MutationError::normalize(
                err,
                "Failed to update team member",
            )),
        }
    }

    /// Delete a team member.
    pub async fn delete(&self, id: &TeamMemberId) -> Result<(), MutationError> {
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.resource.invalidate();
                Ok(())
            }
            Err(err) => Err(MutationError::normalize(
                err,
                "Failed to delete team member",
            )),
        }
    }
}
