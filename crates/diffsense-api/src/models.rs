//! Request and response envelopes

use diffsense_diff::IgnoredFile;
use diffsense_domain::{Finding, ReviewOutcome, SeverityBreakdown};
use serde::{Deserialize, Serialize};

/// A review request: either a raw diff or a pull-request reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Pull-request number, used together with `repo`
    pub pr_number: Option<u64>,
    /// Repository in `owner/repo` format
    pub repo: Option<String>,
    /// Raw unified diff, for direct input
    pub diff: Option<String>,
}

impl ReviewRequest {
    /// Check that either a non-blank diff or a full PR reference is present
    pub fn is_valid(&self) -> bool {
        let has_pr = self.pr_number.is_some() && self.repo.is_some();
        let has_diff = self
            .diff
            .as_deref()
            .is_some_and(|diff| !diff.trim().is_empty());
        has_pr || has_diff
    }
}

/// The review report returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Pull-request number, echoed from the request
    pub pr_number: Option<u64>,
    /// Repository, echoed from the request
    pub repo: Option<String>,
    /// Ranked, deduplicated findings
    pub findings: Vec<Finding>,
    /// True when at least one analyzer call failed or was cut off
    pub partial: bool,
    /// Total number of findings
    pub total_issues: usize,
    /// Number of critical findings
    pub critical_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info items
    pub info_count: usize,
    /// Files the parser saw but excluded from review
    pub ignored_files: Vec<IgnoredFile>,
}

impl ReviewResponse {
    /// Assemble a response from a review outcome
    pub fn from_outcome(
        pr_number: Option<u64>,
        repo: Option<String>,
        outcome: ReviewOutcome,
        ignored_files: Vec<IgnoredFile>,
    ) -> Self {
        let counts = SeverityBreakdown::tally(&outcome.findings);
        Self {
            pr_number,
            repo,
            total_issues: counts.total(),
            critical_count: counts.critical,
            warning_count: counts.warning,
            info_count: counts.info,
            findings: outcome.findings,
            partial: outcome.partial,
            ignored_files,
        }
    }
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the service can answer at all
    pub status: String,
}
