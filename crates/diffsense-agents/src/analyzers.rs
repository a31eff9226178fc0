//! Specialized review analyzers
//!
//! One trait, four concrete variants. Each variant fixes a review category,
//! a prompt instruction, and a name; everything else (backend access, reply
//! parsing) is shared machinery. Analyzers hold no state across calls and
//! are safely reentrant.

use std::sync::Arc;

use async_trait::async_trait;
use diffsense_domain::{ChangeUnit, Finding, ReviewCategory};
use diffsense_providers::TextGenerator;
use tracing::debug;

use crate::{error::AgentError, prompt::build_prompt, reply::parse_reply};

/// Trait for change-unit analyzers
///
/// The single capability the orchestrator depends on: given a change unit,
/// produce findings in this analyzer's domain. Backend failures propagate;
/// failure isolation is the orchestrator's job.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Get the analyzer's unique name
    fn name(&self) -> &str;

    /// Get the review category this analyzer produces
    fn category(&self) -> ReviewCategory;

    /// Analyze a single change unit and return findings in this domain
    async fn analyze(&self, unit: &ChangeUnit) -> Result<Vec<Finding>, AgentError>;
}

async fn run_analysis(
    generator: &dyn TextGenerator,
    unit: &ChangeUnit,
    category: ReviewCategory,
    name: &str,
    instruction: &str,
) -> Result<Vec<Finding>, AgentError> {
    debug!(analyzer = name, file = %unit.file_path, start_line = unit.start_line, "analyzing unit");

    let prompt = build_prompt(unit, instruction);
    let reply = generator.generate(&prompt).await?;
    Ok(parse_reply(&reply, unit, category, name))
}

/// Analyzer focused on logical flaws and edge cases
pub struct LogicAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl LogicAnalyzer {
    const INSTRUCTION: &'static str = "Identify logical flaws, incorrect conditions, \
        off-by-one errors, unhandled edge cases, and error-handling gaps in the changed code.";

    /// Create a new logic analyzer backed by the given generator
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Analyzer for LogicAnalyzer {
    fn name(&self) -> &str {
        "logic"
    }

    fn category(&self) -> ReviewCategory {
        ReviewCategory::Logic
    }

    async fn analyze(&self, unit: &ChangeUnit) -> Result<Vec<Finding>, AgentError> {
        run_analysis(
            self.generator.as_ref(),
            unit,
            ReviewCategory::Logic,
            self.name(),
            Self::INSTRUCTION,
        )
        .await
    }
}

/// Analyzer focused on naming, clarity, and structure
pub struct ReadabilityAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl ReadabilityAnalyzer {
    const INSTRUCTION: &'static str = "Identify readability problems: unclear names, \
        confusing structure, dead code, and places a maintainer would stumble.";

    /// Create a new readability analyzer backed by the given generator
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Analyzer for ReadabilityAnalyzer {
    fn name(&self) -> &str {
        "readability"
    }

    fn category(&self) -> ReviewCategory {
        ReviewCategory::Readability
    }

    async fn analyze(&self, unit: &ChangeUnit) -> Result<Vec<Finding>, AgentError> {
        run_analysis(
            self.generator.as_ref(),
            unit,
            ReviewCategory::Readability,
            self.name(),
            Self::INSTRUCTION,
        )
        .await
    }
}

/// Analyzer focused on algorithmic and resource costs
pub struct PerformanceAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl PerformanceAnalyzer {
    const INSTRUCTION: &'static str = "Identify performance problems: needless allocation, \
        quadratic loops, repeated work, and blocking calls on hot paths.";

    /// Create a new performance analyzer backed by the given generator
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Analyzer for PerformanceAnalyzer {
    fn name(&self) -> &str {
        "performance"
    }

    fn category(&self) -> ReviewCategory {
        ReviewCategory::Performance
    }

    async fn analyze(&self, unit: &ChangeUnit) -> Result<Vec<Finding>, AgentError> {
        run_analysis(
            self.generator.as_ref(),
            unit,
            ReviewCategory::Performance,
            self.name(),
            Self::INSTRUCTION,
        )
        .await
    }
}

/// Analyzer detecting security issues and vulnerabilities
pub struct SecurityAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl SecurityAnalyzer {
    const INSTRUCTION: &'static str = "Identify security vulnerabilities: injection, \
        unsafe deserialization, secrets in code, missing validation, and unsafe defaults.";

    /// Create a new security analyzer backed by the given generator
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Analyzer for SecurityAnalyzer {
    fn name(&self) -> &str {
        "security"
    }

    fn category(&self) -> ReviewCategory {
        ReviewCategory::Security
    }

    async fn analyze(&self, unit: &ChangeUnit) -> Result<Vec<Finding>, AgentError> {
        run_analysis(
            self.generator.as_ref(),
            unit,
            ReviewCategory::Security,
            self.name(),
            Self::INSTRUCTION,
        )
        .await
    }
}

/// The default analyzer set, one per review category
pub fn default_analyzers(generator: Arc<dyn TextGenerator>) -> Vec<Arc<dyn Analyzer>> {
    vec![
        Arc::new(LogicAnalyzer::new(Arc::clone(&generator))),
        Arc::new(ReadabilityAnalyzer::new(Arc::clone(&generator))),
        Arc::new(PerformanceAnalyzer::new(Arc::clone(&generator))),
        Arc::new(SecurityAnalyzer::new(generator)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffsense_domain::{Language, Severity};
    use diffsense_providers::{FailingGenerator, ProviderError, ScriptedGenerator};

    fn unit() -> ChangeUnit {
        ChangeUnit {
            file_path: "src/handler.py".to_string(),
            language: Some(Language::Python),
            original_lines: vec![],
            new_lines: vec!["value = items[i]".to_string()],
            start_line: 12,
        }
    }

    #[tokio::test]
    async fn logic_analyzer_fixes_category_and_agent_name() {
        let generator = Arc::new(
            ScriptedGenerator::new().with_reply("logical flaws", "critical: line 12 unguarded index"),
        );
        let analyzer = LogicAnalyzer::new(generator);

        let findings = analyzer.analyze(&unit()).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, ReviewCategory::Logic);
        assert_eq!(findings[0].source_agent, "logic");
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].line_number, 12);
    }

    #[tokio::test]
    async fn security_analyzer_embeds_its_own_instruction() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .with_reply("security vulnerabilities", "warning: line 12 unvalidated input")
                .with_default("should not be used"),
        );
        let analyzer = SecurityAnalyzer::new(generator);

        let findings = analyzer.analyze(&unit()).await.unwrap();
        assert_eq!(findings[0].message, "unvalidated input");
        assert_eq!(findings[0].category, ReviewCategory::Security);
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let analyzer = ReadabilityAnalyzer::new(Arc::new(FailingGenerator));
        let err = analyzer.analyze(&unit()).await.unwrap_err();
        assert!(matches!(err, AgentError::Backend(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn default_set_covers_all_categories() {
        let generator: Arc<dyn TextGenerator> = Arc::new(ScriptedGenerator::new());
        let analyzers = default_analyzers(generator);

        let categories: Vec<ReviewCategory> = analyzers.iter().map(|a| a.category()).collect();
        assert_eq!(
            categories,
            vec![
                ReviewCategory::Logic,
                ReviewCategory::Readability,
                ReviewCategory::Performance,
                ReviewCategory::Security,
            ]
        );
    }
}
