//! Observability infrastructure.
//!
//! Two halves with different owners:
//!
//! - **Diagnostic sinks** are passed *into* the analysis core. Classifiers
//!   report recursion detection, signature overrides and heuristic matches as
//!   structured [`Diagnostic`] events; the caller decides where they go.
//! - **Logging setup** installs the process-wide `tracing` subscriber and is
//!   only called from the binary.
//!
//! ## Usage
//!
//! ```rust
//! use codesense::observability::{Diagnostic, RecordingSink};
//! use codesense::pipeline::Analyzer;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(RecordingSink::new());
//! let analyzer = Analyzer::default().with_sink(sink.clone());
//! analyzer.report("int f(int n) { return f(n - 1); }");
//! assert!(sink
//!     .events()
//!     .iter()
//!     .any(|event| matches!(event, Diagnostic::RecursionDetected { .. })));
//! ```

pub mod logging;
pub mod sink;

pub use logging::{filter_for_verbosity, init_logging, LOG_ENV_VAR};
pub use sink::{Diagnostic, DiagnosticSink, Dimension, NullSink, RecordingSink, TracingSink};
