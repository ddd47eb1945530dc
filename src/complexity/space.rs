//! Heuristic auxiliary space classification.
//!
//! Same shape as the time classifier with a shorter chain: signature fixtures,
//! then evidence of input-sized storage, then recursion depth, then `O(1)`.

use super::patterns;
use super::signatures::find_override;
use crate::core::ComplexityLabel;
use crate::observability::{Diagnostic, DiagnosticSink, Dimension};

/// More bracket/brace groups than this suggests materialized collections.
pub const LITERAL_GROUP_LIMIT: usize = 2;
/// More literal concatenations than this suggests a growing string.
pub const CONCATENATION_LIMIT: usize = 5;

pub fn classify_space(code: &str, recursive: bool, sink: &dyn DiagnosticSink) -> ComplexityLabel {
    if let Some(fixture) = find_override(code) {
        sink.record(Diagnostic::SignatureOverride {
            dimension: Dimension::Space,
            signature: fixture.name,
            label: fixture.space,
        });
        return fixture.space;
    }

    let (rule, label) = general_rule(code, recursive);
    sink.record(Diagnostic::HeuristicMatched {
        dimension: Dimension::Space,
        rule,
        label,
    });
    label
}

fn general_rule(code: &str, recursive: bool) -> (&'static str, ComplexityLabel) {
    if patterns::has_dynamic_allocation(code) {
        return ("dynamic-allocation", ComplexityLabel::Linear);
    }
    if patterns::count_literal_groups(code) > LITERAL_GROUP_LIMIT {
        return ("literal-groups", ComplexityLabel::Linear);
    }
    if patterns::count_string_concatenations(code) > CONCATENATION_LIMIT {
        return ("string-concatenation", ComplexityLabel::Linear);
    }
    if recursive {
        return ("recursion-depth", ComplexityLabel::Linear);
    }
    ("constant", ComplexityLabel::Constant)
}
