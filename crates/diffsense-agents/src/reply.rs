//! Tolerant parsing of free-form backend replies
//!
//! The backend returns prose, not guaranteed structure. The grammar here
//! looks for line-delimited entries starting with a severity keyword,
//! optionally followed by a line reference and a message. A reply in which
//! nothing matches degrades to a single info-level finding carrying the
//! full text, so no backend output is ever silently discarded. This module
//! never fails and performs no I/O.

use diffsense_domain::{ChangeUnit, Finding, ReviewCategory, Severity};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:[-*]\s*)?(critical|warning|info)\b\s*[:\-]*\s*(.*)$")
        .expect("entry pattern is valid")
});

static LINE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:line\s+(\d+)\b|L:\s*(\d+)|(\d+)\s*:)\s*[:\-,.]?\s*")
        .expect("line reference pattern is valid")
});

static SUGGESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[.;]?\s*suggestion:\s*(.*)$").expect("suggestion pattern is valid"));

/// Parse one analyzer's raw backend reply into findings
///
/// Every finding carries the analyzer's fixed `category` and name; the
/// backend cannot reassign either.
pub fn parse_reply(
    raw: &str,
    unit: &ChangeUnit,
    category: ReviewCategory,
    source_agent: &str,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for line in raw.lines() {
        let Some(caps) = ENTRY_RE.captures(line) else {
            continue;
        };
        let Some(severity) = Severity::from_keyword(&caps[1]) else {
            continue;
        };
        let rest = caps[2].trim();
        if rest.is_empty() {
            continue;
        }

        let (line_number, body) = split_line_reference(rest);
        let (message, suggestion) = split_suggestion(body);
        let message = if message.is_empty() {
            rest.to_string()
        } else {
            message
        };

        findings.push(Finding {
            file_path: unit.file_path.clone(),
            line_number,
            severity,
            category,
            message,
            suggestion,
            source_agent: source_agent.to_string(),
        });
    }

    if findings.is_empty() {
        let text = raw.trim();
        if !text.is_empty() {
            trace!(agent = source_agent, "no structured entries, degrading to info finding");
            findings.push(Finding {
                file_path: unit.file_path.clone(),
                line_number: 0,
                severity: Severity::Info,
                category,
                message: text.to_string(),
                suggestion: None,
                source_agent: source_agent.to_string(),
            });
        }
    }

    findings
}

/// Split a leading line reference (`line N`, `L:N`, or `N:`) off an entry body
fn split_line_reference(rest: &str) -> (u32, &str) {
    let Some(caps) = LINE_REF_RE.captures(rest) else {
        return (0, rest);
    };

    let digits = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str());
    let Some(number) = digits.and_then(|d| d.parse::<u32>().ok()) else {
        return (0, rest);
    };

    let remainder = rest[caps.get(0).map(|m| m.end()).unwrap_or(0)..].trim();
    (number, remainder)
}

/// Split a trailing `suggestion: ...` clause off the message
fn split_suggestion(body: &str) -> (String, Option<String>) {
    let Some(caps) = SUGGESTION_RE.captures(body) else {
        return (body.trim().to_string(), None);
    };

    let suggestion = caps[1].trim();
    let message = body[..caps.get(0).map(|m| m.start()).unwrap_or(body.len())].trim();
    if suggestion.is_empty() {
        return (message.to_string(), None);
    }
    (message.to_string(), Some(suggestion.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffsense_domain::Language;

    fn unit() -> ChangeUnit {
        ChangeUnit {
            file_path: "a.py".to_string(),
            language: Some(Language::Python),
            original_lines: vec![],
            new_lines: vec!["data[idx]".to_string()],
            start_line: 12,
        }
    }

    #[test]
    fn parses_severity_line_number_and_message() {
        let findings = parse_reply(
            "critical: line 12 unguarded access",
            &unit(),
            ReviewCategory::Logic,
            "logic",
        );

        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.severity, Severity::Critical);
        assert_eq!(finding.line_number, 12);
        assert_eq!(finding.message, "unguarded access");
        assert_eq!(finding.category, ReviewCategory::Logic);
        assert_eq!(finding.source_agent, "logic");
    }

    #[test]
    fn accepts_alternate_line_reference_shapes() {
        let findings = parse_reply(
            "warning: L:7 shadowed variable\ninfo: 3: unused import",
            &unit(),
            ReviewCategory::Readability,
            "readability",
        );

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line_number, 7);
        assert_eq!(findings[0].message, "shadowed variable");
        assert_eq!(findings[1].line_number, 3);
        assert_eq!(findings[1].message, "unused import");
    }

    #[test]
    fn severity_keyword_is_case_insensitive_and_bullets_allowed() {
        let findings = parse_reply(
            "- CRITICAL: line 2 sql injection\n* Warning - missing input validation",
            &unit(),
            ReviewCategory::Security,
            "security",
        );

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[1].severity, Severity::Warning);
        assert_eq!(findings[1].line_number, 0);
    }

    #[test]
    fn entry_without_line_reference_is_file_level() {
        let findings = parse_reply(
            "warning: function does too many things",
            &unit(),
            ReviewCategory::Readability,
            "readability",
        );

        assert_eq!(findings[0].line_number, 0);
        assert_eq!(findings[0].message, "function does too many things");
    }

    #[test]
    fn unmatched_prose_degrades_to_single_info_finding() {
        let raw = "The code looks mostly fine but consider renaming x.";
        let findings = parse_reply(raw, &unit(), ReviewCategory::Readability, "readability");

        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.severity, Severity::Info);
        assert_eq!(finding.line_number, 0);
        assert_eq!(finding.message, raw);
    }

    #[test]
    fn blank_reply_produces_no_findings() {
        assert!(parse_reply("", &unit(), ReviewCategory::Logic, "logic").is_empty());
        assert!(parse_reply("  \n\t\n", &unit(), ReviewCategory::Logic, "logic").is_empty());
    }

    #[test]
    fn suggestion_clause_is_split_out() {
        let findings = parse_reply(
            "warning: line 4 magic number. suggestion: extract a named constant",
            &unit(),
            ReviewCategory::Readability,
            "readability",
        );

        assert_eq!(findings[0].message, "magic number");
        assert_eq!(
            findings[0].suggestion.as_deref(),
            Some("extract a named constant")
        );
    }

    #[test]
    fn prose_between_entries_is_dropped() {
        let raw = "Here is my review:\n\
                   critical: line 9 divide by zero\n\
                   Overall the change is reasonable.";
        let findings = parse_reply(raw, &unit(), ReviewCategory::Logic, "logic");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line_number, 9);
    }

    #[test]
    fn entry_with_only_line_reference_keeps_reference_as_message() {
        let findings = parse_reply("warning: line 5", &unit(), ReviewCategory::Logic, "logic");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line_number, 5);
        assert_eq!(findings[0].message, "line 5");
    }
}
