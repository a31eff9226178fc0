//! Diffsense GitHub - Pull-request fetching
//!
//! Thin client for the GitHub REST operations the review service needs:
//! pull-request metadata and the raw unified diff. The review core never
//! fetches anything itself; this crate is the collaborator that hands it
//! diff text.

pub mod client;
pub mod errors;
pub mod models;

pub use client::{GitHubClient, GitHubConfig};
pub use errors::{GitHubError, Result};
pub use models::{BranchRef, PullRequestInfo};
