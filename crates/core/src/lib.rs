//! Sprintdeck core data models.
//!
//! This crate defines the records exchanged with the sprint-tracking
//! backend and the client-side notification types built on top of them.

#![warn(missing_docs)]

// Core identities
mod id;

// Resource records
mod member;
mod task;
mod sprint;

// Transient status broadcast
mod notification;

// Re-exports
pub use id::{SprintId, TaskId, TeamMemberId};

pub use member::{NewTeamMember, Skill, TeamMember};
pub use notification::{Notification, Severity};
pub use sprint::{NewSprint, RiskLevel, Sprint, SprintStatus};
pub use task::{NewTask, Priority, Task, TaskStatus};

/// Error returned when an enum's wire form fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind}: {value}")]
pub struct ParseEnumError {
    /// Which enum was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
