//! Team member model - capacity and skills as tracked by the backend.

use crate::id::TeamMemberId;
use crate::Time;
use serde::{Deserialize, Serialize};

/// A named skill with a proficiency level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill name
    pub name: String,

    /// 0.0 to 1.0
    pub proficiency: f64,
}

/// A team member as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    /// Server-assigned identifier
    pub id: TeamMemberId,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Skills with proficiency
    #[serde(default)]
    pub skills: Vec<Skill>,

    /// Hours available in the sprint
    #[serde(default)]
    pub total_hours_available: f64,

    /// Hours already assigned
    #[serde(default)]
    pub current_workload: f64,

    /// Whether the member can take work at all
    #[serde(default = "default_availability")]
    pub availability: bool,

    /// Creation timestamp, when the server reports one
    #[serde(default)]
    pub created_at: Option<Time>,
}

fn default_availability() -> bool {
    true
}

impl TeamMember {
    /// Remaining unassigned hours.
    pub fn available_hours(&self) -> f64 {
        self.total_hours_available - self.current_workload
    }

    /// Assigned hours as a fraction of total capacity.
    pub fn workload_utilization(&self) -> f64 {
        if self.total_hours_available == 0.0 {
            return 0.0;
        }
        self.current_workload / self.total_hours_available
    }
}

/// Draft payload for creating a team member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeamMember {
    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Skills with proficiency
    pub skills: Vec<Skill>,

    /// Hours available in the sprint
    pub total_hours_available: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(total: f64, workload: f64) -> TeamMember {
        TeamMember {
            id: TeamMemberId::new("m-1"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            skills: vec![],
            total_hours_available: total,
            current_workload: workload,
            availability: true,
            created_at: None,
        }
    }

    #[test]
    fn available_hours_subtracts_workload() {
        assert_eq!(member(40.0, 12.0).available_hours(), 28.0);
    }

    #[test]
    fn utilization_guards_zero_capacity() {
        assert_eq!(member(0.0, 0.0).workload_utilization(), 0.0);
        assert_eq!(member(40.0, 10.0).workload_utilization(), 0.25);
    }

    #[test]
    fn member_defaults_apply_on_sparse_payload() {
        let json = r#"{"id": "m-2", "name": "Grace", "email": "grace@example.com"}"#;
        let m: TeamMember = serde_json::from_str(json).unwrap();
        assert!(m.availability);
        assert_eq!(m.current_workload, 0.0);
        assert!(m.skills.is_empty());
    }
}
