//! Report persistence.
//!
//! Archiving happens after a report has been produced and handed back, so a
//! storage failure can never change or withhold the report itself. Callers
//! treat [`ReportArchive::store`] as best-effort.

use crate::core::{AnalysisReport, Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use xxhash_rust::xxh64::xxh64;

/// A stored report: the report fields plus the analyzed code, an opaque id
/// and the creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedReport {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub code: String,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

impl ArchivedReport {
    pub fn new(code: &str, report: &AnalysisReport, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: record_id(code, timestamp),
            timestamp,
            code: code.to_string(),
            report: report.clone(),
        }
    }
}

/// 16 hex digits of `xxh64(code)` seeded with the timestamp in nanoseconds.
pub fn record_id(code: &str, timestamp: DateTime<Utc>) -> String {
    let seed = timestamp.timestamp_nanos_opt().unwrap_or_default() as u64;
    format!("{:016x}", xxh64(code.as_bytes(), seed))
}

pub trait ReportArchive: Send + Sync {
    fn store(&self, code: &str, report: &AnalysisReport) -> Result<ArchivedReport>;

    /// All stored reports, oldest first.
    fn list(&self) -> Result<Vec<ArchivedReport>>;
}

/// Append-only JSON-lines file, one [`ArchivedReport`] per line.
#[derive(Debug, Clone)]
pub struct JsonlArchive {
    path: PathBuf,
}

impl JsonlArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .map_err(|e| Error::archive("cannot create archive directory", parent, e)),
            _ => Ok(()),
        }
    }
}

impl ReportArchive for JsonlArchive {
    fn store(&self, code: &str, report: &AnalysisReport) -> Result<ArchivedReport> {
        let record = ArchivedReport::new(code, report, Utc::now());
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        self.ensure_parent_dir()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::archive("cannot open archive", &self.path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| Error::archive("cannot append to archive", &self.path, e))?;

        log::debug!("Archived report {} to {}", record.id, self.path.display());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<ArchivedReport>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::archive("cannot read archive", &self.path, e)),
        };

        Ok(contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!(
                        "Skipping corrupt archive entry {}:{}: {}",
                        self.path.display(),
                        index + 1,
                        e
                    );
                    None
                }
            })
            .collect())
    }
}
