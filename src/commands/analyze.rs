use crate::archive::{JsonlArchive, ReportArchive};
use crate::config::CodesenseConfig;
use crate::core::{AnalysisReport, Error};
use crate::io::{self, create_writer, OutputFormat, OutputWriter};
use crate::observability::TracingSink;
use crate::pipeline::Analyzer;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Message shown for unexpected analysis failures instead of partial output
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error during code analysis";

pub struct AnalyzeConfig {
    /// File to read, or `-` for stdin
    pub input: Option<PathBuf>,
    /// Snippet given inline; wins over `input`
    pub code: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub no_archive: bool,
    pub settings: CodesenseConfig,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<AnalysisReport> {
    let code = load_snippet(&config)?;
    let analyzer = Analyzer::from_config(config.settings.clone()).with_sink(Arc::new(TracingSink));

    // The output is only opened once there is a report to put in it.
    let report = analyze_once(&code, &analyzer)?;

    let mut out = io::open_output(config.output.as_deref())?;
    create_writer(config.format, Box::new(&mut out)).write_report(&report)?;
    out.flush().context("Failed to flush report output")?;

    if config.settings.archive.enabled && !config.no_archive {
        let archive = JsonlArchive::new(&config.settings.archive.path);
        archive_best_effort(&archive, &code, &report);
    }
    Ok(report)
}

/// Run the analyzer exactly once.
///
/// Input errors pass through unchanged; anything else is reported as a
/// generic internal failure.
pub fn analyze_once(code: &str, analyzer: &Analyzer) -> Result<AnalysisReport> {
    analyzer.analyze(code).map_err(|err| match err {
        Error::Analysis(_) => anyhow::Error::new(err).context(INTERNAL_ERROR_MESSAGE),
        other => other.into(),
    })
}

/// Store `report`, logging instead of failing. No retry.
pub fn archive_best_effort(archive: &dyn ReportArchive, code: &str, report: &AnalysisReport) {
    match archive.store(code, report) {
        Ok(record) => log::info!("Archived report {}", record.id),
        Err(e) => log::warn!("Failed to archive report: {e}"),
    }
}

fn load_snippet(config: &AnalyzeConfig) -> Result<String> {
    match (&config.code, &config.input) {
        (Some(code), _) => Ok(code.clone()),
        (None, Some(path)) => io::read_source(path),
        (None, None) => Err(Error::EmptyInput.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchivedReport;
    use crate::io::JsonWriter;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FailingArchive;

    impl ReportArchive for FailingArchive {
        fn store(&self, _code: &str, _report: &AnalysisReport) -> crate::core::Result<ArchivedReport> {
            Err(Error::archive(
                "disk full",
                "/tmp/reports.jsonl",
                std::io::Error::other("disk full"),
            ))
        }

        fn list(&self) -> crate::core::Result<Vec<ArchivedReport>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct MemoryArchive {
        stored: Mutex<Vec<String>>,
    }

    impl ReportArchive for MemoryArchive {
        fn store(&self, code: &str, report: &AnalysisReport) -> crate::core::Result<ArchivedReport> {
            self.stored.lock().unwrap().push(code.to_string());
            Ok(ArchivedReport::new(code, report, chrono::Utc::now()))
        }

        fn list(&self) -> crate::core::Result<Vec<ArchivedReport>> {
            Ok(Vec::new())
        }
    }

    fn settings_in(dir: &TempDir) -> CodesenseConfig {
        let mut settings = CodesenseConfig::default();
        settings.archive.path = dir.path().join("reports.jsonl");
        settings
    }

    #[test]
    fn test_report_written_verbatim() {
        let report = analyze_once("eval(x);", &Analyzer::default()).unwrap();
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();
        let written: AnalysisReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(written, report);
    }

    #[test]
    fn test_empty_input_passes_through() {
        let err = analyze_once("", &Analyzer::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::EmptyInput)));
    }

    #[test]
    fn test_rejected_snippet_leaves_output_file_alone() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("report.json");
        std::fs::write(&output, "previous report").unwrap();
        let fresh = dir.path().join("fresh.json");

        for (code, path) in [("", &output), ("", &fresh)] {
            let err = handle_analyze(AnalyzeConfig {
                input: None,
                code: Some(code.to_string()),
                format: OutputFormat::Json,
                output: Some(path.clone()),
                no_archive: true,
                settings: settings_in(&dir),
            })
            .unwrap_err();
            assert!(err.downcast_ref::<Error>().is_some_and(Error::is_client_error));
        }

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous report");
        assert!(!fresh.exists());
    }

    #[test]
    fn test_archive_failure_is_swallowed() {
        let report = Analyzer::default().report("x = 1");
        archive_best_effort(&FailingArchive, "x = 1", &report);
    }

    #[test]
    fn test_archive_receives_code() {
        let archive = MemoryArchive::default();
        let report = Analyzer::default().report("x = 1");
        archive_best_effort(&archive, "x = 1", &report);
        assert_eq!(*archive.stored.lock().unwrap(), vec!["x = 1".to_string()]);
    }

    #[test]
    fn test_handle_analyze_archives_inline_code() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("report.json");
        let settings = settings_in(&dir);
        let archive_path = settings.archive.path.clone();

        let report = handle_analyze(AnalyzeConfig {
            input: None,
            code: Some("eval(x);".to_string()),
            format: OutputFormat::Json,
            output: Some(output.clone()),
            no_archive: false,
            settings,
        })
        .unwrap();

        assert_eq!(report.score, 60);
        assert!(std::fs::read_to_string(&output).unwrap().contains("\"score\": 60"));
        let stored = JsonlArchive::new(archive_path).list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].code, "eval(x);");
    }

    #[test]
    fn test_no_archive_flag() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let archive_path = settings.archive.path.clone();

        handle_analyze(AnalyzeConfig {
            input: None,
            code: Some("x = 1".to_string()),
            format: OutputFormat::Json,
            output: Some(dir.path().join("out.json")),
            no_archive: true,
            settings,
        })
        .unwrap();

        assert!(!archive_path.exists());
    }

    #[test]
    fn test_missing_snippet_is_a_client_error() {
        let dir = TempDir::new().unwrap();
        let err = handle_analyze(AnalyzeConfig {
            input: None,
            code: None,
            format: OutputFormat::Json,
            output: None,
            no_archive: true,
            settings: settings_in(&dir),
        })
        .unwrap_err();
        assert!(err.downcast_ref::<Error>().is_some_and(Error::is_client_error));
    }
}
