//! HTTP transport for the sprintdeck backend.
//!
//! This crate wraps the outbound REST surface: environment-driven
//! configuration, the credential store, bearer-token attachment, the
//! authorization-failure interceptor, and typed endpoint groups. The
//! gateway traits at the bottom are the seam the synchronization layer
//! consumes, so it can run against fakes in tests.

#![warn(missing_docs)]

mod auth;
mod client;
mod config;
mod endpoints;
mod error;
mod gateway;
mod token;

pub use auth::{LoginRedirect, UnauthorizedHandler};
pub use client::ApiClient;
pub use config::{ClientConfig, ENV_API_TIMEOUT_MS, ENV_API_URL, ENV_TOKEN_FILE};
pub use endpoints::{HealthApi, PlanRequest, SprintsApi, TasksApi, TeamMembersApi};
pub use error::{ApiError, Result};
pub use gateway::{SprintGateway, TaskGateway, TeamMemberGateway};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
