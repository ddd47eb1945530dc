//! Heuristic time complexity classification.
//!
//! Rules run in a fixed priority order and the first one that fires decides
//! the label:
//!
//! 1. exact signature fixtures ([`super::signatures`])
//! 2. self-recursion with heavy branching → `O(2^N) or O(N!)`
//! 3. nested loops, or two or more loops anywhere → `O(N^2)`
//! 4. a sort or binary-search call → `O(N log N)`
//! 5. tree-descent search or a halving/doubling loop → `O(log N)`
//! 6. any loop or higher-order iteration → `O(N)`
//! 7. otherwise `O(1)`

use super::patterns;
use super::signatures::find_override;
use crate::core::ComplexityLabel;
use crate::observability::{Diagnostic, DiagnosticSink, Dimension};

/// Branch keywords needed before recursion is treated as exponential.
pub const EXPONENTIAL_BRANCH_MIN: usize = 5;

/// Assign a time label to `code`. `recursive` is the outcome of
/// [`super::functions::is_recursive`] over the snippet's function spans.
pub fn classify_time(code: &str, recursive: bool, sink: &dyn DiagnosticSink) -> ComplexityLabel {
    if let Some(fixture) = find_override(code) {
        sink.record(Diagnostic::SignatureOverride {
            dimension: Dimension::Time,
            signature: fixture.name,
            label: fixture.time,
        });
        return fixture.time;
    }

    let (rule, label) = general_rule(code, recursive);
    sink.record(Diagnostic::HeuristicMatched {
        dimension: Dimension::Time,
        rule,
        label,
    });
    label
}

fn general_rule(code: &str, recursive: bool) -> (&'static str, ComplexityLabel) {
    if recursive && patterns::count_branch_keywords(code) >= EXPONENTIAL_BRANCH_MIN {
        return (
            "branching-recursion",
            ComplexityLabel::ExponentialOrFactorial,
        );
    }
    // The count is cheaper than the nested scan and settles most inputs.
    if patterns::count_loops(code) >= 2 || patterns::has_nested_loop(code) {
        return ("nested-loops", ComplexityLabel::Quadratic);
    }
    if patterns::has_sort_or_search_call(code) {
        return ("sort-or-search-call", ComplexityLabel::Linearithmic);
    }
    if patterns::has_tree_search(code) || patterns::has_halving_loop(code) {
        return ("logarithmic-descent", ComplexityLabel::Logarithmic);
    }
    if patterns::has_linear_iteration(code) {
        return ("linear-iteration", ComplexityLabel::Linear);
    }
    ("constant", ComplexityLabel::Constant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{NullSink, RecordingSink};
    use indoc::indoc;

    fn time(code: &str, recursive: bool) -> ComplexityLabel {
        classify_time(code, recursive, &NullSink)
    }

    #[test]
    fn test_constant_by_default() {
        assert_eq!(time("return a + b;", false), ComplexityLabel::Constant);
        assert_eq!(time("", false), ComplexityLabel::Constant);
    }

    #[test]
    fn test_single_loop_is_linear() {
        let code = "for (int i = 0; i < n; i++) { sum += a[i]; }";
        assert_eq!(time(code, false), ComplexityLabel::Linear);
        assert_eq!(time("xs.map(f)", false), ComplexityLabel::Linear);
    }

    #[test]
    fn test_nested_loops_are_quadratic() {
        let code = indoc! {"
            for (int i = 0; i < n; i++) {
                for (int j = 0; j < n; j++) {
                    total += i * j;
                }
            }
        "};
        assert_eq!(time(code, false), ComplexityLabel::Quadratic);
    }

    #[test]
    fn test_two_sequential_loops_are_quadratic() {
        let code = "for x in a:\n    f(x)\nfor y in b:\n    g(y)\n";
        assert_eq!(time(code, false), ComplexityLabel::Quadratic);
    }

    #[test]
    fn test_sort_call() {
        assert_eq!(time("std::sort(v.begin(), v.end());", false), ComplexityLabel::Linearithmic);
    }

    #[test]
    fn test_logarithmic_rules() {
        assert_eq!(
            time("while (i < n) { i *= 2; visit(i); }", false),
            ComplexityLabel::Logarithmic
        );
        let tree = "if (k < n.key) search(n.left, k); return search(n.right, k);";
        assert_eq!(time(tree, true), ComplexityLabel::Logarithmic);
    }

    #[test]
    fn test_branching_recursion_is_exponential() {
        let code = indoc! {"
            def solve(n):
                if n == 0:
                    return 1
                elif n == 1:
                    return 1
                if n % 2:
                    return solve(n - 1)
                else:
                    return solve(n - 2)
                try:
                    pass
                except ValueError:
                    pass
        "};
        assert_eq!(time(code, true), ComplexityLabel::ExponentialOrFactorial);
        // without recursion the branches alone decide nothing
        assert_eq!(time(code, false), ComplexityLabel::Constant);
    }

    #[test]
    fn test_recursion_with_few_branches_falls_through() {
        let code = "int f(int n) { if (n) return f(n - 1); return 0; }";
        assert_eq!(time(code, true), ComplexityLabel::Constant);
    }

    #[test]
    fn test_override_beats_heuristics_and_is_reported() {
        let code = indoc! {"
            int optCost(vector<int> &freq, int i, int j) {
                if (j < i) return 0;
                if (j == i) return freq[i];
                int fsum = sum(freq, i, j);
                int min = INT_MAX;
                for (int r = i; r <= j; ++r) {
                    int cost = optCost(freq, i, r - 1) + optCost(freq, r + 1, j);
                    if (cost < min) min = cost;
                    else continue;
                    if (min == 0) break;
                }
                return min + fsum;
            }
        "};
        let sink = RecordingSink::new();
        assert_eq!(classify_time(code, true, &sink), ComplexityLabel::Exponential);
        assert_eq!(
            sink.events(),
            vec![Diagnostic::SignatureOverride {
                dimension: Dimension::Time,
                signature: "cpp-obst-recursive",
                label: ComplexityLabel::Exponential,
            }]
        );
    }

    #[test]
    fn test_heuristic_rule_is_reported() {
        let sink = RecordingSink::new();
        classify_time("return 1;", false, &sink);
        assert_eq!(
            sink.events(),
            vec![Diagnostic::HeuristicMatched {
                dimension: Dimension::Time,
                rule: "constant",
                label: ComplexityLabel::Constant,
            }]
        );
    }
}
