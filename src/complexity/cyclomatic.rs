//! Cyclomatic complexity proxy.
//!
//! Without a control-flow graph the decision points are counted straight off
//! the text: branch and loop keywords as whole words (case-insensitive), and
//! every `?` as a stand-in for a ternary. `?` in other roles (optional
//! chaining, Rust's try operator, nullable types) is counted too.
//!
//! The short-circuit operators `&&` / `||` sit in the same word-bounded
//! alternation, so they only count when flanked by word characters
//! (`a&&b`). The spaced form `a && b` adds nothing.

use once_cell::sync::Lazy;
use regex::Regex;

// `else if` is listed first so the pair is one decision point, not two.
static DECISION_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(else if|if|for|while|switch|case|catch|elif|&&|\|\|)\b").unwrap()
});

/// Baseline 1 plus one per decision point found in `code`.
pub fn complexity_proxy(code: &str) -> u32 {
    let keywords = DECISION_KEYWORDS.find_iter(code).count();
    let ternaries = code.matches('?').count();

    let decisions = keywords + ternaries;
    1u32.saturating_add(u32::try_from(decisions).unwrap_or(u32::MAX))
}
