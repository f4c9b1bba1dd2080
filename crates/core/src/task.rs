//! Task model - a unit of sprint work tracked by the backend.

use crate::id::{SprintId, TaskId, TeamMemberId};
use crate::{ParseEnumError, Time};
use serde::{Deserialize, Serialize};

/// Task priority as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal scheduling
    Medium,
    /// Should land this sprint
    High,
    /// Drop everything
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Server-side lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, not yet assigned
    Pending,
    /// Assigned to a team member
    Assigned,
    /// Actively being worked
    InProgress,
    /// Done
    Completed,
    /// Slipped past its deadline
    Delayed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A task as returned by the backend.
///
/// The synchronization layer passes these through without interpreting
/// them; the typed fields exist for consumers that render or filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Skill names this task calls for
    #[serde(default)]
    pub required_skills: Vec<String>,

    /// 0.0 (simple) to 1.0 (complex)
    #[serde(default)]
    pub complexity: f64,

    /// Estimated effort in hours
    #[serde(default)]
    pub estimated_hours: f64,

    /// Scheduling priority
    #[serde(default)]
    pub priority: Priority,

    /// Hard deadline
    pub deadline: Time,

    /// Tasks this one depends on
    #[serde(default)]
    pub depends_on: Vec<TaskId>,

    /// Tasks this one blocks
    #[serde(default)]
    pub blocks: Vec<TaskId>,

    /// Assignee, once the server has allocated one
    #[serde(default)]
    pub assigned_to: Option<TeamMemberId>,

    /// Lifecycle state
    #[serde(default)]
    pub status: TaskStatus,

    /// Hours actually spent, once known
    #[serde(default)]
    pub actual_hours: Option<f64>,

    /// Creation timestamp
    pub created_at: Time,

    /// Sprint this task was planned into, if any
    #[serde(default)]
    pub sprint_id: Option<SprintId>,
}

impl Task {
    /// Whether the server has assigned this task to someone.
    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }
}

/// Draft payload for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Task title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Skill names this task calls for
    pub required_skills: Vec<String>,

    /// 0.0 (simple) to 1.0 (complex)
    pub complexity: f64,

    /// Estimated effort in hours
    pub estimated_hours: f64,

    /// Scheduling priority
    pub priority: Priority,

    /// Hard deadline
    pub deadline: Time,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_uses_lowercase_wire_form() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::from_str::<Priority>("\"critical\"").unwrap(),
            Priority::Critical
        );
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn status_uses_snake_case_wire_form() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn task_tolerates_minimal_payload() {
        let json = r#"{
            "id": "t-1",
            "title": "Fix bug",
            "description": "crash on save",
            "deadline": "2026-09-01T00:00:00Z",
            "created_at": "2026-08-01T00:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.required_skills.is_empty());
        assert!(!task.is_assigned());
    }
}
