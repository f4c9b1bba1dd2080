//! Task store: synchronized collection view plus mutations.

use crate::error::MutationError;
use crate::resource::{FetchOperation, Resource, ResourceState};
use async_trait::async_trait;
use sprintdeck_client::{ApiClient, ApiError, TaskGateway};
use sprintdeck_core::{NewTask, Task, TaskId};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

struct ListTasks {
    gateway: Arc<dyn TaskGateway>,
}

#[async_trait]
impl FetchOperation<Task> for ListTasks {
    async fn fetch(&self) -> Result<Vec<Task>, ApiError> {
        self.gateway.list().await
    }
}

/// Synchronized view of the task collection.
///
/// Every successful mutation invalidates the cached view; the refetch is
/// in flight when the mutation returns. Mutation failures are normalized
/// and re-raised to the caller, never swallowed.
pub struct TaskStore {
    gateway: Arc<dyn TaskGateway>,
    resource: Resource<Task>,
}

impl TaskStore {
    /// Build a store over any gateway implementation.
    pub fn new(gateway: Arc<dyn TaskGateway>) -> Self {
        let resource = Resource::new(Arc::new(ListTasks {
            gateway: gateway.clone(),
        }));
        Self { gateway, resource }
    }

    /// Build a store backed by the live API client.
    pub fn from_client(api: &ApiClient) -> Self {
        Self::new(Arc::new(api.tasks()))
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
    pub fn state(&self) -> ResourceState<Task> {
        self.resource.state()
    }

    /// Subscribe to collection state changes.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Task>> {
        self.resource.subscribe()
    }

    /// Snapshot rows; empty before the first successful load.
    pub fn tasks(&self) -> Vec<Task> {
        self.resource.state().data.unwrap_or_default()
    }

    /// Refetch whenever the watched dependency changes value.
    pub fn watch_dependency<D>(&self, rx: watch::Receiver<D>) -> JoinHandle<()>
    where
        D: Clone + PartialEq + Send + Sync + 'static,
    {
        self.resource.watch_dependency(rx)
    }

    /// Create a task.
    pub async fn create(&self, draft: NewTask) -> Result<Task, MutationError> {
        match self.gateway.create(&draft).await {
            Ok(task) => {
                self.resource.invalidate();
                Ok(task)
            }
            Err(err) => Err(MutationError::normalize(err, "Failed to create task")),
        }
    }

    /// Update a task.
    pub async fn update(&self, id: &TaskId, draft: NewTask) -> Result<Task, MutationError> {
        match self.gateway.update(id, &draft).await {
            Ok(task) => {
                self.resource.invalidate();
                Ok(task)
            }
            Err(err) => Err(MutationError::normalize(err, "Failed to update task")),
        }
    }

    /// Delete a task.
    pub async fn delete(&self, id: &TaskId) -> Result<(), MutationError> {
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.resource.invalidate();
                Ok(())
            }
            Err(err) => Err(MutationError::normalize(err, "Failed to delete task")),
        }
    }
}
