//! Core review pipeline models

use serde::{Deserialize, Serialize};

use crate::languages::Language;

/// Severity of a review finding
///
/// Variant order is the severity order: `Info < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Get the severity name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    /// Parse a severity keyword, case-insensitively
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "warning" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Review domain a finding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewCategory {
    Logic,
    Readability,
    Performance,
    Security,
}

impl ReviewCategory {
    /// Get the category name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewCategory::Logic => "logic",
            ReviewCategory::Readability => "readability",
            ReviewCategory::Performance => "performance",
            ReviewCategory::Security => "security",
        }
    }
}

impl std::fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logically contiguous region of a changed file
///
/// Created by the diff parser, one per hunk, and immutable afterwards.
/// `start_line` is the hunk header's new-file offset, preserved verbatim so
/// findings reference real file lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeUnit {
    /// Path of the changed file
    pub file_path: String,
    /// Detected language, `None` when the extension is unknown
    pub language: Option<Language>,
    /// Lines removed or kept from the old file version
    pub original_lines: Vec<String>,
    /// Lines added or kept in the new file version
    pub new_lines: Vec<String>,
    /// 1-based starting line in the new file version
    pub start_line: u32,
}

impl ChangeUnit {
    /// Number of new lines in this unit
    pub fn line_count(&self) -> usize {
        self.new_lines.len()
    }

    /// Last line covered in the new file version
    pub fn end_line(&self) -> u32 {
        let span = self.original_lines.len().max(self.new_lines.len()) as u32;
        self.start_line + span.saturating_sub(1)
    }

    /// Check if this unit is a pure addition
    pub fn is_addition(&self) -> bool {
        self.original_lines.is_empty() && !self.new_lines.is_empty()
    }

    /// Check if this unit is a pure deletion
    pub fn is_deletion(&self) -> bool {
        !self.original_lines.is_empty() && self.new_lines.is_empty()
    }

    /// Check if this unit modifies existing lines
    pub fn is_modification(&self) -> bool {
        !self.original_lines.is_empty() && !self.new_lines.is_empty()
    }
}

/// One reviewer observation produced by an analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Path of the file the observation concerns
    pub file_path: String,
    /// 1-based line number; 0 means file-level, no specific line
    pub line_number: u32,
    /// Importance of the observation
    pub severity: Severity,
    /// Review domain that produced it
    pub category: ReviewCategory,
    /// The observation itself
    pub message: String,
    /// Suggested fix or improvement, when the analyzer offered one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Name of the analyzer that produced this finding
    pub source_agent: String,
}

impl Finding {
    /// Key under which two findings count as the same observation
    pub fn dedup_key(&self) -> (&str, u32, ReviewCategory) {
        (&self.file_path, self.line_number, self.category)
    }
}

/// Count breakdown of findings by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    /// Number of critical findings
    pub critical: usize,
    /// Number of warnings
    pub warning: usize,
    /// Number of info items
    pub info: usize,
}

impl SeverityBreakdown {
    /// Tally a slice of findings
    pub fn tally(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    /// Total number of findings tallied
    pub fn total(&self) -> usize {
        self.critical + self.warning + self.info
    }
}

/// Result of one orchestrated review pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    /// Deduplicated findings, ranked by severity then location
    pub findings: Vec<Finding>,
    /// True when at least one analyzer call failed or was cut off
    pub partial: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Finding {
        Finding {
            file_path: "a.py".to_string(),
            line_number: 3,
            severity,
            category: ReviewCategory::Logic,
            message: "something".to_string(),
            suggestion: None,
            source_agent: "logic".to_string(),
        }
    }

    #[test]
    fn severity_order_is_info_warning_critical() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn severity_keyword_parse_is_case_insensitive() {
        assert_eq!(Severity::from_keyword("CRITICAL"), Some(Severity::Critical));
        assert_eq!(Severity::from_keyword("Warning"), Some(Severity::Warning));
        assert_eq!(Severity::from_keyword("note"), None);
    }

    #[test]
    fn change_unit_kind_helpers() {
        let unit = ChangeUnit {
            file_path: "a.py".to_string(),
            language: Some(Language::Python),
            original_lines: vec![],
            new_lines: vec!["x = 1".to_string()],
            start_line: 10,
        };
        assert!(unit.is_addition());
        assert!(!unit.is_deletion());
        assert!(!unit.is_modification());
        assert_eq!(unit.end_line(), 10);
    }

    #[test]
    fn end_line_spans_longest_side() {
        let unit = ChangeUnit {
            file_path: "a.py".to_string(),
            language: None,
            original_lines: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            new_lines: vec!["a".to_string()],
            start_line: 5,
        };
        assert_eq!(unit.end_line(), 7);
    }

    #[test]
    fn dedup_key_ignores_severity_and_message() {
        let a = finding(Severity::Info);
        let mut b = finding(Severity::Critical);
        b.message = "different".to_string();
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn breakdown_tallies_by_severity() {
        let findings = vec![
            finding(Severity::Critical),
            finding(Severity::Warning),
            finding(Severity::Warning),
            finding(Severity::Info),
        ];
        let counts = SeverityBreakdown::tally(&findings);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.warning, 2);
        assert_eq!(counts.info, 1);
        assert_eq!(counts.total(), 4);
    }
}
