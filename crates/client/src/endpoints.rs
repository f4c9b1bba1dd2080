//! Typed endpoint groups, one per backend resource.

use crate::client::ApiClient;
use crate::error::Result;
use serde::Serialize;
use sprintdeck_core::{
    NewSprint, NewTask, NewTeamMember, Sprint, SprintId, Task, TaskId, TeamMember, TeamMemberId,
};

impl ApiClient {
    /// Team member endpoints.
    pub fn team_members(&self) -> TeamMembersApi {
        TeamMembersApi { api: self.clone() }
    }

    /// Task endpoints.
    pub fn tasks(&self) -> TasksApi {
        TasksApi { api: self.clone() }
    }

    /// Sprint endpoints.
    pub fn sprints(&self) -> SprintsApi {
        SprintsApi { api: self.clone() }
    }

    /// Health and status endpoints.
    pub fn health(&self) -> HealthApi {
        HealthApi { api: self.clone() }
    }
}

/// `/team-members` endpoints.
#[derive(Clone)]
pub struct TeamMembersApi {
    api: ApiClient,
}

impl TeamMembersApi {
    /// List all team members.
    pub async fn list(&self) -> Result<Vec<TeamMember>> {
        self.api.get("/team-members").await
    }

    /// Fetch one team member.
    pub async fn get(&self, id: &TeamMemberId) -> Result<TeamMember> {
        self.api.get(&format!("/team-members/{}", id)).await
    }

    /// Create a team member.
    pub async fn create(&self, draft: &NewTeamMember) -> Result<TeamMember> {
        self.api.post("/team-members", draft).await
    }

    /// Update a team member.
    pub async fn update(&self, id: &TeamMemberId, draft: &NewTeamMember) -> Result<TeamMember> {
        self.api.put(&format!("/team-members/{}", id), draft).await
    }

    /// Delete a team member.
    pub async fn delete(&self, id: &TeamMemberId) -> Result<()> {
        self.api.delete(&format!("/team-members/{}", id)).await
    }
}

/// `/tasks` endpoints.
#[derive(Clone)]
pub struct TasksApi {
    api: ApiClient,
}

impl TasksApi {
    /// List all tasks.
    pub async fn list(&self) -> Result<Vec<Task>> {
        self.api.get("/tasks").await
    }

    /// List tasks with server-side filter parameters.
    pub async fn list_with(&self, params: &[(String, String)]) -> Result<Vec<Task>> {
        self.api.get_with("/tasks", params).await
    }

    /// Fetch one task.
    pub async fn get(&self, id: &TaskId) -> Result<Task> {
        self.api.get(&format!("/tasks/{}", id)).await
    }

    /// Create a task.
    pub async fn create(&self, draft: &NewTask) -> Result<Task> {
        self.api.post("/tasks", draft).await
    }

    /// Update a task.
    pub async fn update(&self, id: &TaskId, draft: &NewTask) -> Result<Task> {
        self.api.put(&format!("/tasks/{}", id), draft).await
    }

    /// Delete a task.
    pub async fn delete(&self, id: &TaskId) -> Result<()> {
        self.api.delete(&format!("/tasks/{}", id)).await
    }
}

/// Body for the sprint planning endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRequest {
    /// Candidate task identifiers for the server-side planner
    pub available_task_ids: Vec<TaskId>,
}

/// `/sprints` endpoints.
#[derive(Clone)]
pub struct SprintsApi {
    api: ApiClient,
}

impl SprintsApi {
    /// List all sprints.
    pub async fn list(&self) -> Result<Vec<Sprint>> {
        self.api.get("/sprints").await
    }

    /// List sprints with server-side filter parameters.
    pub async fn list_with(&self, params: &[(String, String)]) -> Result<Vec<Sprint>> {
        self.api.get_with("/sprints", params).await
    }

    /// Fetch one sprint.
    pub async fn get(&self, id: &SprintId) -> Result<Sprint> {
        self.api.get(&format!("/sprints/{}", id)).await
    }

    /// Create a sprint.
    pub async fn create(&self, draft: &NewSprint) -> Result<Sprint> {
        self.api.post("/sprints", draft).await
    }

    /// Update a sprint.
    pub async fn update(&self, id: &SprintId, draft: &NewSprint) -> Result<Sprint> {
        self.api.put(&format!("/sprints/{}", id), draft).await
    }

    /// Delete a sprint.
    pub async fn delete(&self, id: &SprintId) -> Result<()> {
        self.api.delete(&format!("/sprints/{}", id)).await
    }

    /// Submit candidate task identifiers to the server-side planner.
    /// The planning result is relayed verbatim; the client does not
    /// interpret it.
    pub async fn plan(
        &self,
        id: &SprintId,
        available_task_ids: &[TaskId],
    ) -> Result<serde_json::Value> {
        let body = PlanRequest {
            available_task_ids: available_task_ids.to_vec(),
        };
        self.api.post(&format!("/sprints/{}/plan", id), &body).await
    }
}

/// Health and status endpoints.
#[derive(Clone)]
pub struct HealthApi {
    api: ApiClient,
}

impl HealthApi {
    /// Probe `/health`.
    pub async fn check(&self) -> Result<serde_json::Value> {
        self.api.get("/health").await
    }

    /// Fetch the service banner at `/`.
    pub async fn status(&self) -> Result<serde_json::Value> {
        self.api.get("/").await
    }
}
