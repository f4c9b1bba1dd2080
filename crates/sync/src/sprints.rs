//! Sprint store: synchronized collection view, mutations, and planning.

use crate::error::MutationError;
use crate::resource::{FetchOperation, Resource, ResourceState};
use async_trait::async_trait;
use sprintdeck_client::{ApiClient, ApiError, SprintGateway};
use sprintdeck_core::{NewSprint, Sprint, SprintId, Task, TaskId};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

struct ListSprints {
    gateway: Arc<dyn SprintGateway>,
}

#[async_trait]
impl FetchOperation<Sprint> for ListSprints {
    async fn fetch(&self) -> Result<Vec<Sprint>, ApiError> {
        self.gateway.list().await
    }
}

/// Synchronized view of the sprint collection.
///
/// Every successful mutation invalidates the cached view; the refetch is
/// in flight when the mutation returns. Mutation failures are normalized
/// and re-raised to the caller, never swallowed.
pub struct SprintStore {
    gateway: Arc<dyn SprintGateway>,
    resource: Resource<Sprint>,
}

impl SprintStore {
    /// Build a store over any gateway implementation.
    pub fn new(gateway: Arc<dyn SprintGateway>) -> Self {
        let resource = Resource::new(Arc::new(ListSprints {
            gateway: gateway.clone(),
        }));
        Self { gateway, resource }
    }

    /// Build a store backed by the live API client.
    pub fn from_client(api: &ApiClient) -> Self {
        Self::new(Arc::new(api.sprints()))
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
    pub fn state(&self) -> ResourceState<Sprint> {
        self.resource.state()
    }

    /// Subscribe to collection state changes.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Sprint>> {
        self.resource.subscribe()
    }

    /// Snapshot rows; empty before the first successful load.
    pub fn sprints(&self) -> Vec<Sprint> {
        self.resource.state().data.unwrap_or_default()
    }

    /// Refetch whenever the watched dependency changes value.
    pub fn watch_dependency<D>(&self, rx: watch::Receiver<D>) -> JoinHandle<()>
    where
        D: Clone + PartialEq + Send + Sync + 'static,
    {
        self.resource.watch_dependency(rx)
    }

    /// Create a sprint.
    pub async fn create(&self, draft: NewSprint) -> Result<Sprint, MutationError> {
        match self.gateway.create(&draft).await {
            Ok(sprint) => {
                self.resource.invalidate();
                Ok(sprint)
            }
            Err(err) => Err(MutationError::normalize(err, "Failed to create sprint")),
        }
    }

    /// Update a sprint.
    pub async fn update(&self, id: &SprintId, draft: NewSprint) -> Result<Sprint, MutationError> {
        match self.gateway.update(id, &draft).await {
            Ok(sprint) => {
                self.resource.invalidate();
                Ok(sprint)
            }
            Err(err) => Err(MutationError::normalize(err, "Failed to update sprint")),
        }
    }

    /// Delete a sprint.
    pub async fn delete(&self, id: &SprintId) -> Result<(), MutationError> {
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.resource.invalidate();
                Ok(())
            }
            Err(err) => Err(MutationError::normalize(err, "Failed to delete sprint")),
        }
    }

    /// Submit the given tasks as planning candidates for a sprint.
    ///
    /// Only the task identifiers are relayed; the server runs the
    /// planning algorithm and its response is returned verbatim.
    pub async fn plan(
        &self,
        sprint_id: &SprintId,
        candidate_tasks: &[Task],
    ) -> Result<serde_json::Value, MutationError> {
        let available_task_ids: Vec<TaskId> =
            candidate_tasks.iter().map(|task| task.id.clone()).collect();

        match self.gateway.plan(sprint_id, &available_task_ids).await {
            Ok(outcome) => {
                self.resource.invalidate();
                Ok(outcome)
            }
            Err(err) => Err(MutationError::normalize(err, "Failed to plan sprint")),
        }
    }
}
