//! Gateway traits over the backend resources.
//!
//! The synchronization layer depends on these rather than on the concrete
//! endpoint groups, so it can be exercised against in-memory fakes.

use crate::endpoints::{SprintsApi, TasksApi, TeamMembersApi};
use crate::error::Result;
use async_trait::async_trait;
use sprintdeck_core::{
    NewSprint, NewTask, NewTeamMember, Sprint, SprintId, Task, TaskId, TeamMember, TeamMemberId,
};

/// Remote operations on the team member collection.
#[async_trait]
pub trait TeamMemberGateway: Send + Sync {
    /// List the collection.
    async fn list(&self) -> Result<Vec<TeamMember>>;

    /// Create a record.
    async fn create(&self, draft: &NewTeamMember) -> Result<TeamMember>;

    /// Update a record.
    async fn update(&self, id: &TeamMemberId, draft: &NewTeamMember) -> Result<TeamMember>;

    /// Delete a record.
    async fn delete(&self, id: &TeamMemberId) -> Result<()>;
}

/// Remote operations on the task collection.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// List the collection.
    async fn list(&self) -> Result<Vec<Task>>;

    /// Create a record.
    async fn create(&self, draft: &NewTask) -> Result<Task>;

    /// Update a record.
    async fn update(&self, id: &TaskId, draft: &NewTask) -> Result<Task>;

    /// Delete a record.
    async fn delete(&self, id: &TaskId) -> Result<()>;
}

/// Remote operations on the sprint collection.
#[async_trait]
pub trait SprintGateway: Send + Sync {
    /// List the collection.
    async fn list(&self) -> Result<Vec<Sprint>>;

    /// Create a record.
    async fn create(&self, draft: &NewSprint) -> Result<Sprint>;

    /// Update a record.
    async fn update(&self, id: &SprintId, draft: &NewSprint) -> Result<Sprint>;

    /// Delete a record.
    async fn delete(&self, id: &SprintId) -> Result<()>;

    /// Relay candidate task identifiers to the server-side planner.
    async fn plan(&self, id: &SprintId, available_task_ids: &[TaskId])
        -> Result<serde_json::Value>;
}

#[async_trait]
impl TeamMemberGateway for TeamMembersApi {
    async fn list(&self) -> Result<Vec<TeamMember>> {
        TeamMembersApi::list(self).await
    }

    async fn create(&self, draft: &NewTeamMember) -> Result<TeamMember> {
        TeamMembersApi::create(self, draft).await
    }

    async fn update(&self, id: &TeamMemberId, draft: &NewTeamMember) -> Result<TeamMember> {
        TeamMembersApi::update(self, id, draft).await
    }

    async fn delete(&self, id: &TeamMemberId) -> Result<()> {
        TeamMembersApi::delete(self, id).await
    }
}

#[async_trait]
impl TaskGateway for TasksApi {
    async fn list(&self) -> Result<Vec<Task>> {
        TasksApi::list(self).await
    }

    async fn create(&self, draft: &NewTask) -> Result<Task> {
        TasksApi::create(self, draft).await
    }

    async fn update(&self, id: &TaskId, draft: &NewTask) -> Result<Task> {
        TasksApi::update(self, id, draft).await
    }

    async fn delete(&self, id: &TaskId) -> Result<()> {
        TasksApi::delete(self, id).await
    }
}

#[async_trait]
impl SprintGateway for SprintsApi {
    async fn list(&self) -> Result<Vec<Sprint>> {
        SprintsApi::list(self).await
    }

    async fn create(&self, draft: &NewSprint) -> Result<Sprint> {
        SprintsApi::create(self, draft).await
    }

    async fn update(&self, id: &SprintId, draft: &NewSprint) -> Result<Sprint> {
        SprintsApi::update(self, id, draft).await
    }

    async fn delete(&self, id: &SprintId) -> Result<()> {
        SprintsApi::delete(self, id).await
    }

    async fn plan(
        &self,
        id: &SprintId,
        available_task_ids: &[TaskId],
    ) -> Result<serde_json::Value> {
        SprintsApi::plan(self, id, available_task_ids).await
    }
}
