//! Sprint model - a planning window over tasks and team capacity.

use crate::id::{SprintId, TaskId, TeamMemberId};
use crate::{ParseEnumError, Time};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintStatus {
    /// Being assembled
    Planning,
    /// Underway
    Active,
    /// On hold
    Paused,
    /// Finished
    Completed,
}

impl Default for SprintStatus {
    fn default() -> Self {
        Self::Planning
    }
}

impl std::fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for SprintStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            other => Err(ParseEnumError {
                kind: "sprint status",
                value: other.to_string(),
            }),
        }
    }
}

/// Feasibility risk the planner attached to a sprint. Display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Comfortable capacity margin
    Low,
    /// Tight but plausible
    Medium,
    /// Overcommitted
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// A sprint as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprint {
    /// Server-assigned identifier
    pub id: SprintId,

    /// Sprint name
    pub name: String,

    /// Sprint start
    pub start_date: Time,

    /// Sprint end
    pub end_date: Time,

    /// Length in days
    #[serde(default = "default_duration_days")]
    pub duration_days: u32,

    /// Members allocated to this sprint
    #[serde(default)]
    pub team_members: Vec<TeamMemberId>,

    /// Total available hours across the team
    #[serde(default)]
    pub total_sprint_capacity: f64,

    /// Tasks planned into the sprint
    #[serde(default)]
    pub task_ids: Vec<TaskId>,

    /// Number of tasks planned in
    #[serde(default)]
    pub planned_tasks: u32,

    /// Number completed so far
    #[serde(default)]
    pub completed_tasks: u32,

    /// Number that failed or were dropped
    #[serde(default)]
    pub failed_tasks: u32,

    /// Planner-assessed risk
    #[serde(default)]
    pub risk_level: RiskLevel,

    /// Whether the planner considered the sprint feasible
    #[serde(default = "default_feasible")]
    pub is_feasible: bool,

    /// Creation timestamp
    pub created_at: Time,

    /// Lifecycle state
    #[serde(default)]
    pub status: SprintStatus,
}

fn default_duration_days() -> u32 {
    14
}

fn default_feasible() -> bool {
    true
}

impl Sprint {
    /// Fraction of planned tasks completed, 0.0 when nothing was planned.
    pub fn progress(&self) -> f64 {
        if self.planned_tasks == 0 {
            return 0.0;
        }
        f64::from(self.completed_tasks) / f64::from(self.planned_tasks)
    }
}

/// Draft payload for creating a sprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSprint {
    /// Sprint name
    pub name: String,

    /// Length in days
    pub duration_days: u32,

    /// Members to allocate
    pub team_member_ids: Vec<TeamMemberId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_risk_use_lowercase_wire_forms() {
        assert_eq!(
            serde_json::to_string(&SprintStatus::Planning).unwrap(),
            "\"planning\""
        );
        assert_eq!(
            serde_json::from_str::<RiskLevel>("\"high\"").unwrap(),
            RiskLevel::High
        );
    }

    #[test]
    fn sprint_defaults_apply_on_sparse_payload() {
        let json = r#"{
            "id": "s-1",
            "name": "Sprint 1",
            "start_date": "2026-08-01T00:00:00Z",
            "end_date": "2026-08-15T00:00:00Z",
            "created_at": "2026-07-30T00:00:00Z"
        }"#;
        let sprint: Sprint = serde_json::from_str(json).unwrap();
        assert_eq!(sprint.duration_days, 14);
        assert_eq!(sprint.status, SprintStatus::Planning);
        assert_eq!(sprint.risk_level, RiskLevel::Medium);
        assert!(sprint.is_feasible);
    }

    #[test]
    fn progress_handles_empty_plan() {
        let json = r#"{
            "id": "s-2",
            "name": "Sprint 2",
            "start_date": "2026-08-01T00:00:00Z",
            "end_date": "2026-08-15T00:00:00Z",
            "created_at": "2026-07-30T00:00:00Z",
            "planned_tasks": 4,
            "completed_tasks": 1
        }"#;
        let sprint: Sprint = serde_json::from_str(json).unwrap();
        assert_eq!(sprint.progress(), 0.25);
    }
}
