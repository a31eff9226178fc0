//! Concurrent review orchestration
//!
//! Fans every (unit, analyzer) pair out over one shared, bounded worker
//! pool, isolates per-task failures, and merges whatever completed into a
//! ranked, deduplicated report. Completion order is not deterministic; the
//! final ranking step is the single point that imposes output order.

use std::collections::{hash_map::Entry, HashMap};
use std::sync::Arc;
use std::time::Duration;

use diffsense_domain::{ChangeUnit, Finding, ReviewCategory, ReviewOutcome};
use diffsense_providers::ProviderError;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::{analyzers::Analyzer, error::AgentError};

/// Fixed analyzer-priority order used by [`TieBreak::AnalyzerPriority`]
const ANALYZER_PRIORITY: &[&str] = &["security", "logic", "performance", "readability"];

/// Policy for duplicate findings of equal severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Keep the finding encountered first in dispatch order
    #[default]
    DispatchOrder,
    /// Prefer the finding whose source analyzer ranks higher in the fixed
    /// priority order (security, logic, performance, readability)
    AnalyzerPriority,
}

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum in-flight backend calls across all units and analyzers
    pub max_concurrency: usize,
    /// Dedup policy for equal-severity duplicates
    pub tie_break: TieBreak,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            tie_break: TieBreak::DispatchOrder,
        }
    }
}

/// Runs the configured analyzers over change units and aggregates findings
///
/// Each `review` call is a fresh, independent execution; nothing carries
/// over between calls.
pub struct Orchestrator {
    analyzers: Vec<Arc<dyn Analyzer>>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator over the given analyzer set
    pub fn new(analyzers: Vec<Arc<dyn Analyzer>>, config: OrchestratorConfig) -> Self {
        Self { analyzers, config }
    }

    /// Create an orchestrator with default configuration
    pub fn with_defaults(analyzers: Vec<Arc<dyn Analyzer>>) -> Self {
        Self::new(analyzers, OrchestratorConfig::default())
    }

    /// The configuration this orchestrator runs with
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Review every change unit with every analyzer
    ///
    /// Tasks run with bounded concurrency. A failing analyzer call marks
    /// the outcome partial without disturbing sibling tasks; an expired
    /// deadline cancels whatever is still in flight and keeps completed
    /// findings. The returned findings are deduplicated on
    /// `(file, line, category)` keeping the highest severity, then ranked
    /// by severity descending, file path, and line number.
    pub async fn review(
        &self,
        units: &[ChangeUnit],
        deadline: Option<Duration>,
    ) -> ReviewOutcome {
        if units.is_empty() || self.analyzers.is_empty() {
            return ReviewOutcome {
                findings: Vec::new(),
                partial: false,
            };
        }

        let task_count = units.len() * self.analyzers.len();
        info!(
            units = units.len(),
            analyzers = self.analyzers.len(),
            tasks = task_count,
            "starting review"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut join_set = JoinSet::new();
        let mut labels = Vec::with_capacity(task_count);

        // unit-major, analyzer-minor: this index order is the dispatch
        // order dedup falls back on
        for unit in units {
            for analyzer in &self.analyzers {
                let index = labels.len();
                labels.push((analyzer.name().to_string(), unit.file_path.clone()));

                let analyzer = Arc::clone(analyzer);
                let unit = unit.clone();
                let semaphore = Arc::clone(&semaphore);
                join_set.spawn(async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => {
                            let closed = ProviderError::Unavailable("worker pool closed".to_string());
                            return (index, Err(AgentError::Backend(closed)));
                        }
                    };
                    (index, analyzer.analyze(&unit).await)
                });
            }
        }

        let mut results: Vec<Option<Result<Vec<Finding>, AgentError>>> =
            (0..task_count).map(|_| None).collect();
        let mut partial = false;

        let drain = async {
            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((index, result)) => results[index] = Some(result),
                    Err(join_error) => {
                        warn!(error = %join_error, "analyzer task aborted");
                    }
                }
            }
        };

        match deadline {
            Some(limit) => {
                if tokio::time::timeout(limit, drain).await.is_err() {
                    warn!(deadline = ?limit, "review deadline expired, cancelling in-flight tasks");
                    join_set.abort_all();
                    partial = true;
                }
            }
            None => drain.await,
        }

        let mut merged = Vec::new();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Some(Ok(findings)) => merged.extend(findings),
                Some(Err(err)) => {
                    let (analyzer, file) = &labels[index];
                    warn!(analyzer = %analyzer, file = %file, error = %err, "analyzer call failed");
                    partial = true;
                }
                // cancelled by the deadline before completing
                None => partial = true,
            }
        }

        let mut findings = dedupe(merged, self.config.tie_break);
        rank(&mut findings);

        debug!(findings = findings.len(), partial, "review complete");
        ReviewOutcome { findings, partial }
    }
}

/// Collapse findings sharing `(file, line, category)` into one
///
/// Higher severity wins; equal severity resolves per the tie-break policy.
/// Input order (dispatch order) is preserved for survivors.
pub(crate) fn dedupe(findings: Vec<Finding>, tie_break: TieBreak) -> Vec<Finding> {
    let mut kept: Vec<Finding> = Vec::new();
    let mut slot_by_key: HashMap<(String, u32, ReviewCategory), usize> = HashMap::new();

    for finding in findings {
        let key = (
            finding.file_path.clone(),
            finding.line_number,
            finding.category,
        );
        match slot_by_key.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(kept.len());
                kept.push(finding);
            }
            Entry::Occupied(entry) => {
                let existing = &mut kept[*entry.get()];
                if finding.severity > existing.severity {
                    *existing = finding;
                } else if finding.severity == existing.severity
                    && tie_break == TieBreak::AnalyzerPriority
                    && priority_rank(&finding.source_agent) < priority_rank(&existing.source_agent)
                {
                    *existing = finding;
                }
            }
        }
    }

    kept
}

fn priority_rank(agent: &str) -> usize {
    ANALYZER_PRIORITY
        .iter()
        .position(|name| *name == agent)
        .unwrap_or(usize::MAX)
}

/// Severity descending, then file path and line number ascending
///
/// Stable, so equal-ranked findings keep dispatch order.
pub(crate) fn rank(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.file_path.cmp(&b.file_path))
            .then_with(|| a.line_number.cmp(&b.line_number))
    });
}
