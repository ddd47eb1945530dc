//! Function body extraction from raw text.
//!
//! Two surface syntaxes are recognized in a single left-to-right scan:
//!
//! - brace-delimited: `[type] name(params) { body }`, body runs to the
//!   first closing brace, so a nested block cuts the body short; a header
//!   with no closing brace after it is not a definition
//! - indentation-delimited: `def name(params):` followed by a block that ends
//!   at the next column-0 `def`, `class`, decorator, call, or end of text
//!
//! After a definition is captured the scan resumes past its body, so nested
//! definitions are part of their parent's body rather than spans of their own.
//! Control headers such as `for (...) {` and `if (...) {` have the same shape
//! and become spans named after the keyword. String literals and comments are
//! not excluded either, so text that merely looks like a definition produces
//! a span too.

use crate::core::FunctionSpan;
use crate::observability::{Diagnostic, DiagnosticSink};
use once_cell::sync::Lazy;
use regex::Regex;

static DEFINITION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?:\b(?:struct|class|void|int|float|char|long|double)\s+\*?\s*)?",
        r"(?P<brace>[A-Za-z_$][0-9A-Za-z_$]*)\s*\([^)]*\)\s*\{",
        r"|\bdef\s+(?P<def>[A-Za-z_$][0-9A-Za-z_$]*)\s*\([^)]*\)\s*:",
    ))
    .unwrap()
});

static INDENTED_BLOCK_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n(?:def|[A-Za-z_$][0-9A-Za-z_$]*\(|class\s|@)").unwrap()
});

/// Find every function-like definition in `code`, in text order.
pub fn extract_function_spans(code: &str) -> Vec<FunctionSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    // Past the last `}` no brace header can close, and skipping the search
    // keeps every brace scan disjoint.
    let last_close = code.rfind('}');

    while cursor < code.len() {
        let Some(caps) = DEFINITION_HEADER.captures_at(code, cursor) else {
            break;
        };
        let header_end = caps.get(0).map_or(code.len(), |m| m.end());

        if let Some(name) = caps.name("brace") {
            let close = last_close
                .filter(|&last| last >= header_end)
                .and_then(|_| code[header_end..].find('}'))
                .map(|offset| header_end + offset);
            match close {
                Some(close) => {
                    push_span(&mut spans, name.as_str(), &code[header_end..close]);
                    cursor = close + 1;
                }
                None => cursor = header_end,
            }
        } else if let Some(name) = caps.name("def") {
            let body_end = INDENTED_BLOCK_END
                .find_at(code, header_end)
                .map_or(code.len(), |m| m.start());
            let body = dedent(&code[header_end..body_end]);
            push_span(&mut spans, name.as_str(), &body);
            cursor = body_end.max(header_end);
        } else {
            cursor = header_end;
        }
    }

    spans
}

/// True if any span calls its own name inside its body.
///
/// Every self-recursive span is reported to `sink`; the answer is the same
/// whether one or several spans recurse.
pub fn is_recursive(spans: &[FunctionSpan], sink: &dyn DiagnosticSink) -> bool {
    let mut recursive = false;
    for span in spans.iter().filter(|span| span.calls_itself()) {
        sink.record(Diagnostic::RecursionDetected {
            function: span.name.clone(),
        });
        recursive = true;
    }
    recursive
}

fn push_span(spans: &mut Vec<FunctionSpan>, name: &str, body: &str) {
    let name = name.trim();
    let body = body.trim();
    if !name.is_empty() && !body.is_empty() {
        spans.push(FunctionSpan::new(name, body));
    }
}

/// Strip the indentation shared by all non-blank lines, keeping relative
/// indentation intact.
fn dedent(block: &str) -> String {
    let min_indent = block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .min()
        .unwrap_or(0);

    if min_indent == 0 {
        return block.to_string();
    }

    block
        .split('\n')
        .map(|line| {
            let strip = leading_whitespace(line).min(min_indent);
            line.chars().skip(strip).collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
