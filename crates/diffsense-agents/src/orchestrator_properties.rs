//! Property-based tests for finding aggregation

#[cfg(test)]
mod tests {
    use diffsense_domain::{Finding, ReviewCategory, Severity};
    use proptest::prelude::*;

    use crate::orchestrator::{dedupe, rank, TieBreak};

    fn arb_severity() -> impl Strategy<Value = Severity> {
        prop_oneof![
            Just(Severity::Info),
            Just(Severity::Warning),
            Just(Severity::Critical),
        ]
    }

    fn arb_category() -> impl Strategy<Value = ReviewCategory> {
        prop_oneof![
            Just(ReviewCategory::Logic),
            Just(ReviewCategory::Readability),
            Just(ReviewCategory::Performance),
            Just(ReviewCategory::Security),
        ]
    }

    prop_compose! {
        fn arb_finding()(
            file in "[ab]\\.py",
            line in 0u32..20,
            severity in arb_severity(),
            category in arb_category(),
        ) -> Finding {
            Finding {
                file_path: file,
                line_number: line,
                severity,
                category,
                message: "m".to_string(),
                suggestion: None,
                source_agent: category.as_str().to_string(),
            }
        }
    }

    proptest! {
        #[test]
        fn dedup_leaves_every_key_unique(
            findings in proptest::collection::vec(arb_finding(), 0..40)
        ) {
            let deduped = dedupe(findings, TieBreak::DispatchOrder);
            let mut keys: Vec<_> = deduped
                .iter()
                .map(|f| (f.file_path.clone(), f.line_number, f.category))
                .collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), total);
        }

        #[test]
        fn dedup_keeps_the_maximum_severity_per_key(
            findings in proptest::collection::vec(arb_finding(), 0..40)
        ) {
            let deduped = dedupe(findings.clone(), TieBreak::DispatchOrder);
            for kept in &deduped {
                let max = findings
                    .iter()
                    .filter(|f| {
                        f.file_path == kept.file_path
                            && f.line_number == kept.line_number
                            && f.category == kept.category
                    })
                    .map(|f| f.severity)
                    .max();
                prop_assert_eq!(Some(kept.severity), max);
            }
        }

        #[test]
        fn ranking_is_monotone_in_severity_and_location(
            findings in proptest::collection::vec(arb_finding(), 0..40)
        ) {
            let mut ranked = dedupe(findings, TieBreak::DispatchOrder);
            rank(&mut ranked);
            for pair in ranked.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.severity >= b.severity);
                if a.severity == b.severity {
                    prop_assert!(
                        (&a.file_path, a.line_number) <= (&b.file_path, b.line_number)
                    );
                }
            }
        }
    }
}
