//! Injectable diagnostics for the analysis core.
//!
//! The classifiers report what they decided through a [`DiagnosticSink`]
//! handed to them by the caller, so the core itself never touches a global
//! logger and stays a pure function of its input.

use crate::core::{ComplexityLabel, IssueKind, Severity};
use std::fmt;
use std::sync::Mutex;

/// Which classifier emitted a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Time,
    Space,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Time => f.write_str("time"),
            Dimension::Space => f.write_str("space"),
        }
    }
}

/// One structured event from the analysis core.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A function span calls itself
    RecursionDetected { function: String },
    /// An exact signature fixture pinned the label
    SignatureOverride {
        dimension: Dimension,
        signature: &'static str,
        label: ComplexityLabel,
    },
    /// A general heuristic rule chose the label
    HeuristicMatched {
        dimension: Dimension,
        rule: &'static str,
        label: ComplexityLabel,
    },
    /// The issue detector raised an issue
    IssueDetected {
        kind: IssueKind,
        severity: Severity,
        line: usize,
    },
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _diagnostic: Diagnostic) {}
}

/// Forwards events to `tracing` at debug level with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::RecursionDetected { function } => {
                tracing::debug!(function = %function, "self-recursive function detected");
            }
            Diagnostic::SignatureOverride {
                dimension,
                signature,
                label,
            } => {
                tracing::debug!(%dimension, signature, %label, "signature override applied");
            }
            Diagnostic::HeuristicMatched {
                dimension,
                rule,
                label,
            } => {
                tracing::debug!(%dimension, rule, %label, "complexity heuristic matched");
            }
            Diagnostic::IssueDetected {
                kind,
                severity,
                line,
            } => {
                tracing::debug!(?kind, %severity, line, "issue detected");
            }
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: Diagnostic) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }
}
