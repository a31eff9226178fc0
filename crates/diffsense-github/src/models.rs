//! GitHub data models

use serde::{Deserialize, Serialize};

/// A branch reference on either side of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    /// Branch name
    #[serde(rename = "ref")]
    pub branch: String,
}

/// Pull-request metadata, the subset the review service uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestInfo {
    /// PR number within the repository
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR state (open, closed)
    pub state: String,
    /// PR body/description
    #[serde(default)]
    pub body: Option<String>,
    /// Head branch
    pub head: BranchRef,
    /// Base branch
    pub base: BranchRef,
    /// Number of lines added
    #[serde(default)]
    pub additions: u64,
    /// Number of lines deleted
    #[serde(default)]
    pub deletions: u64,
    /// Number of files touched
    #[serde(default)]
    pub changed_files: u64,
}
