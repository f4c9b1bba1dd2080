//! Client-side resource synchronization.
//!
//! Keeps a consistent view of each remote collection (team members,
//! tasks, sprints), applies mutations against the backend with a
//! mutate-then-invalidate policy, and broadcasts transient status
//! through the notification slot.

#![warn(missing_docs)]

mod error;
mod members;
mod notify;
mod resource;
mod sprints;
mod tasks;

pub use error::MutationError;
pub use members::TeamMemberStore;
pub use notify::{Notifier, DEFAULT_NOTIFICATION_DURATION};
pub use resource::{FetchOperation, Resource, ResourceState};
pub use sprints::SprintStore;
pub use tasks::TaskStore;
