//! Property-based checks over arbitrary snippets.

use codesense::metrics::LocCounter;
use codesense::{Analyzer, QualityStatus, Severity};
use proptest::prelude::*;

fn clean_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("v_[a-z]{1,8} = [0-9]{1,4}", 1..=10)
}

proptest! {
    #[test]
    fn prop_report_values_stay_in_range(code in "\\PC{0,400}") {
        let report = Analyzer::default().report(&code);

        prop_assert!(report.score <= 100);
        prop_assert!(report.metrics.maintainability <= 100);
        prop_assert!((0.0..=10.0).contains(&report.metrics.readability));
        prop_assert!((0.0..=100.0).contains(&report.metrics.comment_percentage));
        prop_assert!(report.metrics.cyclomatic_complexity_proxy >= 1);
        prop_assert_eq!(report.status, QualityStatus::from_score(report.score));
    }

    #[test]
    fn prop_every_line_is_counted_once(code in "[a-z #/*\\t\\n]{0,200}") {
        let metrics = LocCounter::new().count_content(&code);

        prop_assert_eq!(
            metrics.total_lines,
            metrics.code_lines + metrics.comment_lines + metrics.blank_lines
        );
        prop_assert_eq!(metrics.total_lines, code.split('\n').count());
    }

    #[test]
    fn prop_analysis_is_deterministic(code in "\\PC{1,300}") {
        let analyzer = Analyzer::default();
        let first = analyzer.analyze(&code).unwrap();
        let second = analyzer.analyze(&code).unwrap();

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn prop_eval_call_costs_exactly_forty(lines in clean_lines()) {
        let analyzer = Analyzer::default();
        let clean = lines.join("\n");
        let tainted = format!("{clean}\neval(payload)");

        let before = analyzer.analyze(&clean).unwrap();
        let after = analyzer.analyze(&tainted).unwrap();

        prop_assert_eq!(before.score, 100);
        prop_assert_eq!(after.score, 60);
        prop_assert_eq!(after.count_by_severity(Severity::Critical), 1);
        prop_assert_eq!(after.issues.len(), before.issues.len() + 1);
    }
}
