//! Score aggregation.
//!
//! Pure arithmetic over the detector output. Issue order never matters; the
//! sub-metrics look only at how many issues of each [`IssueKind`] fired.

use crate::config::SeverityWeights;
use crate::core::{Issue, IssueKind, LineMetrics, QualityStatus};
use crate::debt::count_by_kind;
use crate::metrics::loc_counter::round_to_tenth;

pub const MAX_SCORE: u32 = 100;
pub const MAX_READABILITY: f64 = 10.0;
pub const MAX_MAINTAINABILITY: u32 = 100;

/// Comment percentage at which readability takes no documentation penalty.
const READABILITY_COMMENT_TARGET: f64 = 20.0;
const READABILITY_COMMENT_STEP: f64 = 5.0;
const LONG_LINE_PENALTY: f64 = 1.0;
const NESTING_PENALTY: f64 = 1.5;

const PROXY_PENALTY: i64 = 3;
const COMPLEXITY_ISSUE_PENALTY: i64 = 10;
const LOGICAL_ISSUE_PENALTY: i64 = 20;

/// Everything the aggregator derives for one snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: u32,
    pub readability: f64,
    pub maintainability: u32,
    pub status: QualityStatus,
}

pub fn aggregate(
    metrics: &LineMetrics,
    complexity_proxy: u32,
    issues: &[Issue],
    weights: &SeverityWeights,
) -> ScoreBreakdown {
    let score = score(issues, weights);
    ScoreBreakdown {
        score,
        readability: readability(metrics.comment_percentage, issues),
        maintainability: maintainability(complexity_proxy, issues),
        status: QualityStatus::from_score(score),
    }
}

/// `100 - Σ weight(severity)`, floored at 0.
pub fn score(issues: &[Issue], weights: &SeverityWeights) -> u32 {
    let penalty = issues
        .iter()
        .fold(0u32, |acc, issue| acc.saturating_add(weights.weight(issue.severity)));
    MAX_SCORE.saturating_sub(penalty)
}

/// 0.0 - 10.0 at one decimal, lowered by thin commenting, long lines and
/// deep nesting.
pub fn readability(comment_percentage: f64, issues: &[Issue]) -> f64 {
    let documentation_penalty =
        ((READABILITY_COMMENT_TARGET - comment_percentage) / READABILITY_COMMENT_STEP).max(0.0);
    let long_lines = count_by_kind(issues, IssueKind::LongLine) as f64;
    let nesting = count_by_kind(issues, IssueKind::DeepNesting) as f64;

    let raw = MAX_READABILITY
        - documentation_penalty
        - long_lines * LONG_LINE_PENALTY
        - nesting * NESTING_PENALTY;
    round_to_tenth(raw.clamp(0.0, MAX_READABILITY))
}

/// `100 - 3·proxy - 10·complexity issues - 20·logical issues`, within 0..=100.
pub fn maintainability(complexity_proxy: u32, issues: &[Issue]) -> u32 {
    let complexity_issues = count_by_kind(issues, IssueKind::Complexity) as i64;
    let logical_issues = count_by_kind(issues, IssueKind::LogicalForElse) as i64;

    let raw = i64::from(MAX_MAINTAINABILITY)
        - PROXY_PENALTY * i64::from(complexity_proxy)
        - COMPLEXITY_ISSUE_PENALTY * complexity_issues
        - LOGICAL_ISSUE_PENALTY * logical_issues;
    u32::try_from(raw.clamp(0, i64::from(MAX_MAINTAINABILITY))).unwrap_or(0)
}
