use crate::config::ThresholdsConfig;
use crate::core::{Issue, IssueKind, LineMetrics, Severity};
use crate::observability::{Diagnostic, DiagnosticSink};
use once_cell::sync::Lazy;
use regex::Regex;

static EVAL_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\beval\s*\(").unwrap());

static DEBUG_OUTPUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"console\.log|System\.out\.println|printf|print\s*\(").unwrap()
});

// Case-sensitive: `for ... in ...:` followed anywhere later by `else:`.
static FOR_ELSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"for\s+.*\s+in\s+.*:\s*(?s:.*?)else:").unwrap());

const TAB_WIDTH: usize = 4;

/// Run every issue rule over `code` and collect what fires, in rule order.
///
/// Rules are independent of one another; a snippet can trip all of them.
pub fn detect_issues(
    code: &str,
    metrics: &LineMetrics,
    complexity_proxy: u32,
    thresholds: &ThresholdsConfig,
    sink: &dyn DiagnosticSink,
) -> Vec<Issue> {
    let mut issues = find_long_lines(code, thresholds.max_line_length);
    issues.extend(find_eval_calls(code));
    issues.extend(check_complexity(complexity_proxy, thresholds));
    issues.extend(check_documentation(metrics, thresholds));
    issues.extend(check_debug_output(code, thresholds.debug_output_min));
    issues.extend(check_nesting(code, thresholds.max_nesting_depth));
    issues.extend(find_for_else_without_break(code));

    for issue in &issues {
        sink.record(Diagnostic::IssueDetected {
            kind: issue.kind,
            severity: issue.severity,
            line: issue.line,
        });
    }
    issues
}

pub fn find_long_lines(code: &str, max_line_length: usize) -> Vec<Issue> {
    code.split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let length = line.chars().count();
            (length > max_line_length).then(|| {
                let line_num = index + 1;
                Issue::new(
                    IssueKind::LongLine,
                    Severity::Medium,
                    line_num,
                    format!(
                        "Line {line_num} is too long ({length} chars). Max recommended is {max_line_length}."
                    ),
                )
            })
        })
        .collect()
}

/// One critical issue for all `eval(` calls, anchored to the first.
pub fn find_eval_calls(code: &str) -> Option<Issue> {
    // Newlines are counted only between successive matches, one pass overall.
    let mut lines: Vec<usize> = Vec::new();
    let mut line = 1;
    let mut scanned = 0;
    for m in EVAL_CALL.find_iter(code) {
        line += code[scanned..m.start()].matches('\n').count();
        scanned = m.start();
        if lines.last() != Some(&line) {
            lines.push(line);
        }
    }

    let first = *lines.first()?;
    let listed = lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Some(Issue::new(
        IssueKind::UnsafeEval,
        Severity::Critical,
        first,
        format!(
            "Avoid using 'eval()'. Found on line(s): {listed}. This can lead to security vulnerabilities."
        ),
    ))
}

pub fn check_complexity(complexity_proxy: u32, thresholds: &ThresholdsConfig) -> Option<Issue> {
    if complexity_proxy > thresholds.complexity_high {
        Some(Issue::new(
            IssueKind::Complexity,
            Severity::High,
            1,
            format!(
                "Very high estimated complexity ({complexity_proxy}). This code is likely hard to understand, test, and maintain."
            ),
        ))
    } else if complexity_proxy > thresholds.complexity_medium {
        Some(Issue::new(
            IssueKind::Complexity,
            Severity::Medium,
            1,
            format!(
                "High estimated complexity ({complexity_proxy}). Consider refactoring for simplicity."
            ),
        ))
    } else {
        None
    }
}

pub fn check_documentation(metrics: &LineMetrics, thresholds: &ThresholdsConfig) -> Option<Issue> {
    let underdocumented = metrics.code_lines > thresholds.documentation_min_code_lines
        && metrics.comment_percentage < thresholds.documentation_min_comment_percentage;

    underdocumented.then(|| {
        Issue::new(
            IssueKind::LowDocumentation,
            Severity::Medium,
            1,
            format!(
                "Low comment percentage ({}%). Code might be difficult to understand without comments.",
                metrics.comment_percentage
            ),
        )
    })
}

pub fn check_debug_output(code: &str, debug_output_min: usize) -> Option<Issue> {
    let instances = DEBUG_OUTPUT.find_iter(code).count();
    (instances >= debug_output_min).then(|| {
        Issue::new(
            IssueKind::DebugOutput,
            Severity::Low,
            1,
            format!(
                "Excessive debug output ({instances} instances). Remove debug logs from production code."
            ),
        )
    })
}

pub fn check_nesting(code: &str, max_nesting_depth: usize) -> Option<Issue> {
    let deepest = code
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(nesting_depth)
        .max()
        .unwrap_or(0);
    (deepest > max_nesting_depth).then(|| {
        Issue::new(
            IssueKind::DeepNesting,
            Severity::Medium,
            1,
            format!(
                "Potentially deep nesting detected (max depth: {deepest}). Consider refactoring to reduce complexity."
            ),
        )
    })
}

/// `for`/`else` with an `if` somewhere and no `break` anywhere in the text.
///
/// The three conditions are checked over the whole snippet, not within one
/// loop, so an unrelated `if` elsewhere still counts.
pub fn find_for_else_without_break(code: &str) -> Option<Issue> {
    if !(FOR_ELSE.is_match(code) && code.contains("if ") && !code.contains("break")) {
        return None;
    }
    let line = code
        .split('\n')
        .position(|line| line.contains("for "))
        .map_or(1, |index| index + 1);
    Some(Issue::new(
        IssueKind::LogicalForElse,
        Severity::High,
        line,
        "Logical Issue: 'for...else' loop in Python used with an 'if' condition but no 'break'. The 'else' block will execute even if the 'if' condition is met within the loop.".to_string(),
    ))
}

/// Indentation depth of one line: every four leading whitespace characters
/// count as a level and each leading tab counts once more on top.
pub fn nesting_depth(line: &str) -> usize {
    let leading: Vec<char> = line.chars().take_while(|c| c.is_whitespace()).collect();
    let tabs = leading.iter().filter(|&&c| c == '\t').count();
    leading.len() / TAB_WIDTH + tabs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::LocCounter;
    use crate::observability::{NullSink, RecordingSink};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn detect(code: &str) -> Vec<Issue> {
        let metrics = LocCounter::new().count_content(code);
        let proxy = crate::complexity::complexity_proxy(code);
        detect_issues(code, &metrics, proxy, &ThresholdsConfig::default(), &NullSink)
    }

    #[test]
    fn test_single_eval_call() {
        let issues = detect("eval(x);");
        assert_eq!(
            issues,
            vec![Issue::new(
                IssueKind::UnsafeEval,
                Severity::Critical,
                1,
                "Avoid using 'eval()'. Found on line(s): 1. This can lead to security vulnerabilities."
                    .to_string(),
            )]
        );
    }

    #[test]
    fn test_eval_lines_are_listed_and_anchored_to_first() {
        let issue = find_eval_calls("a = 1\nb = eval(a)\nc = eval (b) + eval(a)").unwrap();
        assert_eq!(issue.line, 2);
        assert!(issue.description.contains("Found on line(s): 2, 3."));
        assert!(find_eval_calls("evaluate(x); my_eval(y)").is_none());
    }

    #[test]
    fn test_eval_line_numbers_across_blank_runs() {
        let code = "eval(a)\n\n\n\nx = eval(b); eval(c)\n\ny = eval(d)";
        let issue = find_eval_calls(code).unwrap();
        assert_eq!(issue.line, 1);
        assert!(issue.description.contains("Found on line(s): 1, 5, 7."));
    }

    #[test]
    fn test_eval_flood_scans_in_linear_time() {
        let code = "eval(\n".repeat(43_000);
        let started = std::time::Instant::now();
        let issue = find_eval_calls(&code).unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
        assert!(issue.description.contains("42999, 43000."));
    }

    #[test]
    fn test_long_line() {
        let code = "x".repeat(150);
        let issues = detect(&code);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::LongLine);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(
            issues[0].description,
            "Line 1 is too long (150 chars). Max recommended is 100."
        );
    }

    #[test]
    fn test_line_length_counts_characters() {
        let code = "é".repeat(100);
        assert!(find_long_lines(&code, 100).is_empty());
        assert_eq!(find_long_lines(&format!("ok\n{code}é"), 100)[0].line, 2);
    }

    #[test]
    fn test_complexity_thresholds_are_exclusive() {
        let thresholds = ThresholdsConfig::default();
        assert!(check_complexity(10, &thresholds).is_none());

        let medium = check_complexity(11, &thresholds).unwrap();
        assert_eq!(medium.severity, Severity::Medium);
        assert_eq!(
            medium.description,
            "High estimated complexity (11). Consider refactoring for simplicity."
        );

        assert_eq!(check_complexity(18, &thresholds).unwrap().severity, Severity::Medium);
        assert_eq!(check_complexity(19, &thresholds).unwrap().severity, Severity::High);
    }

    #[test]
    fn test_low_documentation() {
        let code = "x = 1\n".repeat(31);
        let issue = detect(&code)
            .into_iter()
            .find(|issue| issue.kind == IssueKind::LowDocumentation)
            .unwrap();
        assert_eq!(
            issue.description,
            "Low comment percentage (0%). Code might be difficult to understand without comments."
        );

        let thirty = "x = 1\n".repeat(30);
        assert!(detect(&thirty)
            .iter()
            .all(|issue| issue.kind != IssueKind::LowDocumentation));
    }

    #[test]
    fn test_documented_code_passes() {
        let code = "// note\nx = 1\n".repeat(20);
        assert!(detect(&code).is_empty());
    }

    #[test]
    fn test_debug_output() {
        let code = "console.log(a);\nprint(b)\nprintf(\"%d\", c);";
        let issue = check_debug_output(code, 3).unwrap();
        assert_eq!(issue.severity, Severity::Low);
        assert_eq!(
            issue.description,
            "Excessive debug output (3 instances). Remove debug logs from production code."
        );
        assert!(check_debug_output("print(a)\nprint (b)", 3).is_none());
    }

    #[test]
    fn test_nesting_depth() {
        assert_eq!(nesting_depth("code"), 0);
        assert_eq!(nesting_depth("        code"), 2);
        assert_eq!(nesting_depth("\t\t\tcode"), 3);
        assert_eq!(nesting_depth("\t\t\t\t\t\tcode"), 7);
        assert_eq!(nesting_depth("   code"), 0);
    }

    #[test]
    fn test_deep_nesting_issue() {
        let code = format!("start\n{}deep\n", " ".repeat(24));
        let issue = check_nesting(&code, 5).unwrap();
        assert_eq!(issue.line, 1);
        assert!(issue.description.contains("(max depth: 6)"));
        assert!(check_nesting(&format!("{}ok", " ".repeat(20)), 5).is_none());
    }

    #[test]
    fn test_indented_blank_lines_do_not_count_as_nesting() {
        let code = format!("x = 1\n{}\ny = 2", " ".repeat(24));
        assert!(check_nesting(&code, 5).is_none());
        assert!(detect(&code).is_empty());
        assert!(check_nesting(&format!("x = 1\n{}\t\n", "\t".repeat(8)), 5).is_none());
    }

    #[test]
    fn test_for_else_without_break() {
        let code = indoc! {"
            items = load()
            for item in items:
                if item == target:
                    found = True
            else:
                missing = True
        "};
        let issues = detect(code);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::LogicalForElse);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].line, 2);
        assert!(issues[0].description.contains("'for...else'"));
    }

    #[test]
    fn test_for_else_with_break_is_fine() {
        let code = indoc! {"
            for item in items:
                if item == target:
                    break
            else:
                missing = True
        "};
        assert!(find_for_else_without_break(code).is_none());
    }

    #[test]
    fn test_for_else_needs_a_conditional() {
        let code = "for item in items:\n    total += item\nelse:\n    done = True\n";
        assert!(find_for_else_without_break(code).is_none());
    }

    #[test]
    fn test_every_issue_is_reported_to_sink() {
        let code = "eval(a)\neval(b)";
        let metrics = LocCounter::new().count_content(code);
        let sink = RecordingSink::new();
        let issues = detect_issues(code, &metrics, 1, &ThresholdsConfig::default(), &sink);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            sink.events(),
            vec![Diagnostic::IssueDetected {
                kind: IssueKind::UnsafeEval,
                severity: Severity::Critical,
                line: 1,
            }]
        );
    }
}
