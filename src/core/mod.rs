pub mod errors;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub use errors::{Error, Result};

/// Issue severity, ordered from most to least severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The detector rule that produced an issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    LongLine,
    UnsafeEval,
    Complexity,
    LowDocumentation,
    DebugOutput,
    DeepNesting,
    LogicalForElse,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub description: String,
    /// 1-based line number; 1 when the issue is not tied to a line.
    pub line: usize,
    #[serde(rename = "rule")]
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(kind: IssueKind, severity: Severity, line: usize, description: String) -> Self {
        Self {
            severity,
            description,
            line: line.max(1),
            kind,
        }
    }
}

/// Line classification totals for a snippet.
///
/// `code_lines + comment_lines + blank_lines == total_lines` always holds.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMetrics {
    pub total_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    /// Percentage of comment lines, rounded to one decimal.
    pub comment_percentage: f64,
}

/// A function-like definition found in the text. Names may repeat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSpan {
    pub name: String,
    pub body: String,
}

impl FunctionSpan {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// True when the body contains `name(` (optional whitespace before the
    /// parenthesis) where `name` is not the tail of a longer identifier.
    pub fn calls_itself(&self) -> bool {
        if self.name.is_empty() {
            return false;
        }
        self.body.match_indices(self.name.as_str()).any(|(start, _)| {
            let boundary_before = self.body[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !is_word_char(c));
            let after = self.body[start + self.name.len()..].trim_start();
            boundary_before && after.starts_with('(')
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Asymptotic complexity class assigned by the classifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComplexityLabel {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
    Cubic,
    Exponential,
    ExponentialOrFactorial,
}

impl ComplexityLabel {
    pub const ALL: [ComplexityLabel; 8] = [
        ComplexityLabel::Constant,
        ComplexityLabel::Logarithmic,
        ComplexityLabel::Linear,
        ComplexityLabel::Linearithmic,
        ComplexityLabel::Quadratic,
        ComplexityLabel::Cubic,
        ComplexityLabel::Exponential,
        ComplexityLabel::ExponentialOrFactorial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLabel::Constant => "O(1)",
            ComplexityLabel::Logarithmic => "O(log N)",
            ComplexityLabel::Linear => "O(N)",
            ComplexityLabel::Linearithmic => "O(N log N)",
            ComplexityLabel::Quadratic => "O(N^2)",
            ComplexityLabel::Cubic => "O(N^3)",
            ComplexityLabel::Exponential => "O(2^N)",
            ComplexityLabel::ExponentialOrFactorial => "O(2^N) or O(N!)",
        }
    }
}

impl fmt::Display for ComplexityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplexityLabel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown complexity label '{s}'"))
    }
}

impl Serialize for ComplexityLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComplexityLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Overall verdict derived from the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityStatus {
    Excellent,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    #[serde(rename = "Poor Quality")]
    PoorQuality,
}

impl QualityStatus {
    pub const EXCELLENT_THRESHOLD: u32 = 80;
    pub const ACCEPTABLE_THRESHOLD: u32 = 50;

    /// Three-tier mapping shared by the aggregator and the presentation layer.
    pub fn from_score(score: u32) -> Self {
        if score >= Self::EXCELLENT_THRESHOLD {
            QualityStatus::Excellent
        } else if score >= Self::ACCEPTABLE_THRESHOLD {
            QualityStatus::NeedsImprovement
        } else {
            QualityStatus::PoorQuality
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityStatus::Excellent => "Excellent",
            QualityStatus::NeedsImprovement => "Needs Improvement",
            QualityStatus::PoorQuality => "Poor Quality",
        }
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetrics {
    /// Code lines (blank and comment lines excluded).
    pub loc: usize,
    pub comment_percentage: f64,
    pub cyclomatic_complexity_proxy: u32,
    /// 0.0 - 10.0, one decimal.
    pub readability: f64,
    /// 0 - 100.
    pub maintainability: u32,
    pub time_complexity: ComplexityLabel,
    pub space_complexity: ComplexityLabel,
}

/// The complete result of analyzing one snippet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub score: u32,
    pub status: QualityStatus,
    pub metrics: ReportMetrics,
    pub issues: Vec<Issue>,
}

impl AnalysisReport {
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}
