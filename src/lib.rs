//! Heuristic quality analysis for source snippets in any language.
//!
//! The analysis core (`metrics`, `complexity`, `debt`, `scoring`, wired
//! together by `pipeline`) is a pure function of its input text. The
//! remaining modules are the plumbing around it: configuration, report
//! archiving, output rendering and the command-line surface.

pub mod archive;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod core;
pub mod debt;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod pipeline;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, ComplexityLabel, Error, FunctionSpan, Issue, IssueKind, LineMetrics,
    QualityStatus, ReportMetrics, Result, Severity,
};

pub use crate::archive::{ArchivedReport, JsonlArchive, ReportArchive};
pub use crate::config::CodesenseConfig;
pub use crate::io::output::{create_writer, DisplayClass, OutputFormat, OutputWriter};
pub use crate::observability::{Diagnostic, DiagnosticSink};
pub use crate::pipeline::{analyze_snippet, Analyzer};
pub use crate::scoring::{aggregate, ScoreBreakdown};
