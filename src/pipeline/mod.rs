//! End-to-end analysis of one snippet.
//!
//! The stages are pure functions wired together here:
//!
//! ```text
//! text ─┬─ LocCounter ──────────┐
//!       ├─ complexity_proxy ────┼─ detect_issues ─┐
//!       │                       │                 ├─ aggregate ─ AnalysisReport
//!       └─ function spans ─ recursion ─ time/space┘
//! ```
//!
//! [`Analyzer::report`] is the bare pipeline and accepts any text, empty
//! included. [`Analyzer::analyze`] is the boundary used by callers: it
//! rejects empty and oversized input first and turns a panic inside any
//! stage into [`Error::Analysis`], so a partial report never escapes.

use crate::complexity::{
    classify_space, classify_time, complexity_proxy, extract_function_spans, is_recursive,
};
use crate::config::CodesenseConfig;
use crate::core::{AnalysisReport, Error, ReportMetrics, Result};
use crate::debt::detect_issues;
use crate::metrics::LocCounter;
use crate::observability::{DiagnosticSink, NullSink};
use crate::scoring::aggregate;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Reusable, stateless analyzer. Cheap to clone and safe to share between
/// threads; each call works only on its own input.
#[derive(Clone)]
pub struct Analyzer {
    config: CodesenseConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::from_config(CodesenseConfig::default())
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    pub fn from_config(config: CodesenseConfig) -> Self {
        Self {
            config,
            sink: Arc::new(NullSink),
        }
    }

    /// Route classifier diagnostics to `sink` instead of discarding them.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &CodesenseConfig {
        &self.config
    }

    /// Validate `code` and run the pipeline behind a panic boundary.
    pub fn analyze(&self, code: &str) -> Result<AnalysisReport> {
        self.check_input(code)?;

        let span = tracing::debug_span!("analyze", bytes = code.len());
        let _guard = span.enter();

        let report = catch_unwind(AssertUnwindSafe(|| self.report(code))).map_err(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::error!(%message, "analysis stage panicked");
            Error::Analysis(message)
        })?;

        tracing::debug!(
            score = report.score,
            status = %report.status,
            issues = report.issues.len(),
            "analysis complete"
        );
        Ok(report)
    }

    /// Run every stage over `code` without input checks.
    pub fn report(&self, code: &str) -> AnalysisReport {
        let sink = self.sink.as_ref();
        let line_metrics = LocCounter::new().count_content(code);
        let proxy = complexity_proxy(code);
        let issues = detect_issues(code, &line_metrics, proxy, &self.config.thresholds, sink);

        let spans = extract_function_spans(code);
        let recursive = is_recursive(&spans, sink);
        let time_complexity = classify_time(code, recursive, sink);
        let space_complexity = classify_space(code, recursive, sink);

        let breakdown = aggregate(&line_metrics, proxy, &issues, &self.config.scoring);

        AnalysisReport {
            score: breakdown.score,
            status: breakdown.status,
            metrics: ReportMetrics {
                loc: line_metrics.code_lines,
                comment_percentage: line_metrics.comment_percentage,
                cyclomatic_complexity_proxy: proxy,
                readability: breakdown.readability,
                maintainability: breakdown.maintainability,
                time_complexity,
                space_complexity,
            },
            issues,
        }
    }

    fn check_input(&self, code: &str) -> Result<()> {
        if code.is_empty() {
            return Err(Error::EmptyInput);
        }
        let limit = self.config.limits.max_input_bytes;
        if code.len() > limit {
            return Err(Error::InputTooLarge {
                size: code.len(),
                limit,
            });
        }
        Ok(())
    }
}

/// Analyze `code` with default configuration.
pub fn analyze_snippet(code: &str) -> Result<AnalysisReport> {
    Analyzer::default().analyze(code)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "analysis panicked".to_string()
    }
}
