//! Diffsense Agents - Specialized review analyzers and orchestration
//!
//! Four analyzers (logic, readability, performance, security) each turn a
//! change unit into findings by prompting a generation backend and parsing
//! its free-form reply. The orchestrator fans units out across analyzers
//! with bounded concurrency, isolates per-analyzer failures, and merges the
//! combined findings into one ranked, deduplicated report.

pub mod analyzers;
pub mod error;
pub mod orchestrator;
mod orchestrator_properties;
pub mod prompt;
pub mod reply;

pub use analyzers::{
    default_analyzers, Analyzer, LogicAnalyzer, PerformanceAnalyzer, ReadabilityAnalyzer,
    SecurityAnalyzer,
};
pub use error::AgentError;
pub use orchestrator::{Orchestrator, OrchestratorConfig, TieBreak};
pub use reply::parse_reply;
