//! Issue detection over snippet text.

pub mod patterns;

use crate::core::{Issue, IssueKind};

pub use patterns::{detect_issues, nesting_depth};

pub fn count_by_kind(issues: &[Issue], kind: IssueKind) -> usize {
    issues.iter().filter(|issue| issue.kind == kind).count()
}
