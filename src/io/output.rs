use crate::archive::ArchivedReport;
use crate::core::{AnalysisReport, QualityStatus, Severity};
use colored::*;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Visual tier for a score. Uses the same thresholds as
/// [`QualityStatus::from_score`], so it always agrees with the report status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayClass {
    Excellent,
    NeedsImprovement,
    Poor,
}

impl DisplayClass {
    pub fn from_score(score: u32) -> Self {
        QualityStatus::from_score(score).into()
    }

    /// Style class name used by HTML-style renderers
    pub fn css_class(&self) -> &'static str {
        match self {
            DisplayClass::Excellent => "excellent",
            DisplayClass::NeedsImprovement => "needs-improvement",
            DisplayClass::Poor => "poor-quality",
        }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            DisplayClass::Excellent => text.green().bold(),
            DisplayClass::NeedsImprovement => text.yellow().bold(),
            DisplayClass::Poor => text.red().bold(),
        }
    }
}

impl From<QualityStatus> for DisplayClass {
    fn from(status: QualityStatus) -> Self {
        match status {
            QualityStatus::Excellent => DisplayClass::Excellent,
            QualityStatus::NeedsImprovement => DisplayClass::NeedsImprovement,
            QualityStatus::PoorQuality => DisplayClass::Poor,
        }
    }
}

/// One file's outcome in a batch run: either a report or the reason it was
/// not analyzed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn analyzed(path: PathBuf, report: AnalysisReport) -> Self {
        Self {
            path,
            report: Some(report),
            error: None,
        }
    }

    pub fn rejected(path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            report: None,
            error: Some(error.into()),
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
    fn write_batch(&mut self, entries: &[BatchEntry]) -> anyhow::Result<()>;
    fn write_history(&mut self, records: &[ArchivedReport]) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_value(report)
    }

    fn write_batch(&mut self, entries: &[BatchEntry]) -> anyhow::Result<()> {
        self.write_value(entries)
    }

    fn write_history(&mut self, records: &[ArchivedReport]) -> anyhow::Result<()> {
        self.write_value(records)
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Code Quality Report")?;
        writeln!(self.writer)?;
        self.write_summary(report)?;
        self.write_issues(report)?;
        Ok(())
    }

    fn write_batch(&mut self, entries: &[BatchEntry]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Batch Analysis")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| File | Score | Status | Issues |")?;
        writeln!(self.writer, "|------|-------|--------|--------|")?;
        for entry in entries {
            let path = entry.path.display();
            match (&entry.report, &entry.error) {
                (Some(report), _) => writeln!(
                    self.writer,
                    "| {path} | {} | {} | {} |",
                    report.score,
                    report.status,
                    report.issues.len()
                )?,
                (None, error) => writeln!(
                    self.writer,
                    "| {path} | - | rejected: {} | - |",
                    escape_cell(error.as_deref().unwrap_or("unknown error"))
                )?,
            }
        }
        Ok(())
    }

    fn write_history(&mut self, records: &[ArchivedReport]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Report History")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Id | Timestamp | Score | Status | LOC |")?;
        writeln!(self.writer, "|----|-----------|-------|--------|-----|")?;
        for record in records {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                record.id,
                record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                record.report.score,
                record.report.status,
                record.report.metrics.loc
            )?;
        }
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let metrics = &report.metrics;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_row("Score", &format!("{} / 100", report.score))?;
        self.write_row("Status", report.status.as_str())?;
        self.write_row("Lines of Code", &metrics.loc.to_string())?;
        self.write_row("Comment Percentage", &format!("{}%", metrics.comment_percentage))?;
        self.write_row(
            "Complexity Proxy",
            &metrics.cyclomatic_complexity_proxy.to_string(),
        )?;
        self.write_row("Readability", &format!("{:.1} / 10", metrics.readability))?;
        self.write_row("Maintainability", &format!("{} / 100", metrics.maintainability))?;
        self.write_row("Time Complexity", metrics.time_complexity.as_str())?;
        self.write_row("Space Complexity", metrics.space_complexity.as_str())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_row(&mut self, metric: &str, value: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} |")?;
        Ok(())
    }

    fn write_issues(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Issues")?;
        writeln!(self.writer)?;
        if report.issues.is_empty() {
            writeln!(self.writer, "No issues found.")?;
            return Ok(());
        }
        writeln!(self.writer, "| Severity | Line | Description |")?;
        writeln!(self.writer, "|----------|------|-------------|")?;
        for issue in &report.issues {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                issue.severity,
                issue.line,
                escape_cell(&issue.description)
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let metrics = &report.metrics;
        let class = DisplayClass::from_score(report.score);

        writeln!(self.writer, "{}", "Code Quality Report".bold().blue())?;
        writeln!(self.writer, "{}", "===================".blue())?;
        writeln!(
            self.writer,
            "Score: {} ({})",
            class.paint(&format!("{}/100", report.score)),
            class.paint(report.status.as_str())
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "  Lines of code:      {}", metrics.loc)?;
        writeln!(self.writer, "  Comments:           {}%", metrics.comment_percentage)?;
        writeln!(
            self.writer,
            "  Complexity proxy:   {}",
            metrics.cyclomatic_complexity_proxy
        )?;
        writeln!(self.writer, "  Readability:        {:.1}/10", metrics.readability)?;
        writeln!(self.writer, "  Maintainability:    {}/100", metrics.maintainability)?;
        writeln!(self.writer, "  Time complexity:    {}", metrics.time_complexity)?;
        writeln!(self.writer, "  Space complexity:   {}", metrics.space_complexity)?;
        writeln!(self.writer)?;

        if report.issues.is_empty() {
            writeln!(self.writer, "{} No issues found.", "✓".green())?;
            return Ok(());
        }
        writeln!(self.writer, "Issues ({}):", report.issues.len())?;
        for issue in &report.issues {
            writeln!(
                self.writer,
                "  {} line {}: {}",
                severity_tag(issue.severity),
                issue.line,
                issue.description
            )?;
        }
        Ok(())
    }

    fn write_batch(&mut self, entries: &[BatchEntry]) -> anyhow::Result<()> {
        for entry in entries {
            let path = entry.path.display();
            match (&entry.report, &entry.error) {
                (Some(report), _) => {
                    let class = DisplayClass::from_score(report.score);
                    writeln!(
                        self.writer,
                        "{:>5}  {}  {path} ({} issues)",
                        class.paint(&report.score.to_string()),
                        class.paint(report.status.as_str()),
                        report.issues.len()
                    )?;
                }
                (None, error) => writeln!(
                    self.writer,
                    "{:>5}  {}  {path}: {}",
                    "-",
                    "rejected".red(),
                    error.as_deref().unwrap_or("unknown error")
                )?,
            }
        }
        let analyzed = entries.iter().filter(|e| e.report.is_some()).count();
        writeln!(
            self.writer,
            "{} of {} files analyzed",
            analyzed,
            entries.len()
        )?;
        Ok(())
    }

    fn write_history(&mut self, records: &[ArchivedReport]) -> anyhow::Result<()> {
        if records.is_empty() {
            writeln!(self.writer, "No archived reports.")?;
            return Ok(());
        }
        for record in records {
            let class = DisplayClass::from_score(record.report.score);
            writeln!(
                self.writer,
                "{}  {}  {:>3}  {}",
                record.id.dimmed(),
                record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                class.paint(&record.report.score.to_string()),
                record.report.status
            )?;
        }
        Ok(())
    }
}

fn severity_tag(severity: Severity) -> ColoredString {
    let tag = format!("[{}]", severity.as_str().to_uppercase());
    match severity {
        Severity::Critical => tag.red().bold(),
        Severity::High => tag.red(),
        Severity::Medium => tag.yellow(),
        Severity::Low => tag.blue(),
        Severity::Info => tag.normal(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
