//! Line counting for unidentified snippets
//!
//! Every line of the snippet lands in exactly one bucket:
//!
//! - **Blank Lines**: nothing but whitespace
//! - **Comment Lines**: after trimming, start with `//`, `/*`, `*` or `#`
//! - **Code Lines**: everything else
//!
//! The invariant `total_lines == code_lines + comment_lines + blank_lines` always holds.
//!
//! ## Language-Agnostic Detection
//!
//! The snippet carries no language tag, so the comment markers of the common
//! C-family and script languages are all honored at once. A line that merely
//! *contains* a marker after some code (`x = 1 // note`) counts as code.
//!
//! ## Limitations
//!
//! - Block comment state is not tracked; a block comment line that does not
//!   start with `*` counts as code
//! - `#include`, `#[derive]` and shebang lines count as comments
//! - Markers inside string literals are not detected

use crate::core::LineMetrics;

const COMMENT_MARKERS: [&str; 4] = ["//", "/*", "*", "#"];

/// Counts blank, comment and code lines in snippet text.
///
/// # Examples
///
/// ```rust
/// use codesense::metrics::LocCounter;
///
/// let metrics = LocCounter::default().count_content("// add\nx = a + b\n");
/// assert_eq!(metrics.total_lines, 3);
/// assert_eq!(metrics.comment_lines, 1);
/// assert_eq!(metrics.code_lines, 1);
/// assert_eq!(metrics.blank_lines, 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocCounter;

impl LocCounter {
    pub fn new() -> Self {
        Self
    }

    /// Count lines in snippet content (pure function)
    ///
    /// Lines are split on `\n`; a trailing newline yields one final blank
    /// line, and the empty string is a single blank line.
    pub fn count_content(&self, content: &str) -> LineMetrics {
        let mut metrics = LineMetrics::default();

        for line in content.split('\n') {
            metrics.total_lines += 1;
            match classify_line(line.trim()) {
                LineType::Blank => metrics.blank_lines += 1,
                LineType::Comment => metrics.comment_lines += 1,
                LineType::Code => metrics.code_lines += 1,
            }
        }

        metrics.comment_percentage = comment_percentage(metrics.comment_lines, metrics.total_lines);
        metrics
    }
}

/// Line type classification for LOC counting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineType {
    Blank,
    Comment,
    Code,
}

fn classify_line(trimmed: &str) -> LineType {
    if trimmed.is_empty() {
        LineType::Blank
    } else if COMMENT_MARKERS
        .iter()
        .any(|marker| trimmed.starts_with(marker))
    {
        LineType::Comment
    } else {
        LineType::Code
    }
}

/// `100 * comment / total`, rounded to one decimal; 0 for an empty count.
pub fn comment_percentage(comment_lines: usize, total_lines: usize) -> f64 {
    if total_lines == 0 {
        return 0.0;
    }
    round_to_tenth(comment_lines as f64 / total_lines as f64 * 100.0)
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
