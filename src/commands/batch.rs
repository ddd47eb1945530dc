use crate::config::CodesenseConfig;
use crate::io::{self, create_writer, BatchEntry, OutputFormat};
use crate::observability::TracingSink;
use crate::pipeline::Analyzer;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

pub struct BatchConfig {
    /// Files or directories; directories are walked recursively
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub settings: CodesenseConfig,
}

pub fn handle_batch(config: BatchConfig) -> Result<Vec<BatchEntry>> {
    let files = collect_files(&config.paths);
    log::info!("Analyzing {} files", files.len());

    let analyzer = Analyzer::from_config(config.settings).with_sink(Arc::new(TracingSink));
    let entries = analyze_files(&files, &analyzer);

    let mut out = io::open_output(config.output.as_deref())?;
    create_writer(config.format, Box::new(&mut out)).write_batch(&entries)?;
    out.flush().context("Failed to flush batch output")?;
    Ok(entries)
}

/// Expand directories into the regular files below them, sorted by path.
/// Explicit file arguments are kept as given.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = paths
        .iter()
        .flat_map(|path| {
            if path.is_dir() {
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(|entry| match entry {
                        Ok(entry) => Some(entry),
                        Err(e) => {
                            log::warn!("Skipping unreadable entry: {e}");
                            None
                        }
                    })
                    .filter(|entry| entry.file_type().is_file())
                    .map(|entry| entry.into_path())
                    .collect::<Vec<_>>()
            } else {
                vec![path.clone()]
            }
        })
        .collect();
    files.sort();
    files.dedup();
    files
}

/// Analyze every file independently and in parallel. Output order follows
/// `files`.
pub fn analyze_files(files: &[PathBuf], analyzer: &Analyzer) -> Vec<BatchEntry> {
    files
        .par_iter()
        .map(|path| analyze_file(path, analyzer))
        .collect()
}

fn analyze_file(path: &Path, analyzer: &Analyzer) -> BatchEntry {
    let code = match fs::read_to_string(path) {
        Ok(code) => code,
        Err(e) => return BatchEntry::rejected(path.to_path_buf(), format!("cannot read file: {e}")),
    };
    match analyzer.analyze(&code) {
        Ok(report) => BatchEntry::analyzed(path.to_path_buf(), report),
        Err(e) => {
            log::debug!("Rejected {}: {}", path.display(), e);
            BatchEntry::rejected(path.to_path_buf(), e.to_string())
        }
    }
}
