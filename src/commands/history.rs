use crate::archive::{ArchivedReport, JsonlArchive, ReportArchive};
use crate::io::{self, create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

pub struct HistoryConfig {
    pub archive_path: PathBuf,
    /// Keep only the most recent N reports
    pub limit: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_history(config: HistoryConfig) -> Result<Vec<ArchivedReport>> {
    let archive = JsonlArchive::new(&config.archive_path);
    let records = archive
        .list()
        .with_context(|| format!("Failed to load {}", config.archive_path.display()))?;
    let records = most_recent(records, config.limit);

    let mut out = io::open_output(config.output.as_deref())?;
    create_writer(config.format, Box::new(&mut out)).write_history(&records)?;
    out.flush().context("Failed to flush history output")?;
    Ok(records)
}

/// Last `limit` records in their stored order, oldest first.
pub fn most_recent(mut records: Vec<ArchivedReport>, limit: Option<usize>) -> Vec<ArchivedReport> {
    if let Some(limit) = limit {
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analyze_snippet;
    use tempfile::TempDir;

    fn archive_with(dir: &TempDir, snippets: &[&str]) -> PathBuf {
        let path = dir.path().join("reports.jsonl");
        let archive = JsonlArchive::new(&path);
        for snippet in snippets {
            archive.store(snippet, &analyze_snippet(snippet).unwrap()).unwrap();
        }
        path
    }

    #[test]
    fn test_limit_keeps_newest() {
        let dir = TempDir::new().unwrap();
        let path = archive_with(&dir, &["a = 1", "b = 2", "c = 3"]);
        let records = JsonlArchive::new(path).list().unwrap();

        let codes: Vec<_> = most_recent(records.clone(), Some(2))
            .into_iter()
            .map(|r| r.code)
            .collect();
        assert_eq!(codes, vec!["b = 2", "c = 3"]);
        assert_eq!(most_recent(records.clone(), None).len(), 3);
        assert_eq!(most_recent(records, Some(10)).len(), 3);
    }

    #[test]
    fn test_handle_history_json() {
        let dir = TempDir::new().unwrap();
        let path = archive_with(&dir, &["eval(x);", "x = 1"]);
        let output = dir.path().join("history.json");

        let records = handle_history(HistoryConfig {
            archive_path: path,
            limit: Some(1),
            format: OutputFormat::Json,
            output: Some(output.clone()),
        })
        .unwrap();
        assert_eq!(records.len(), 1);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(value[0]["code"], "x = 1");
        assert_eq!(value[0]["score"], 100);
        assert_eq!(value[0]["id"].as_str().unwrap().len(), 16);
    }

    #[test]
    fn test_empty_history() {
        let dir = TempDir::new().unwrap();
        let records = handle_history(HistoryConfig {
            archive_path: dir.path().join("none.jsonl"),
            limit: None,
            format: OutputFormat::Terminal,
            output: Some(dir.path().join("out.txt")),
        })
        .unwrap();
        assert!(records.is_empty());
    }
}
