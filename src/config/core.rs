use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::scoring::SeverityWeights;
use super::thresholds::ThresholdsConfig;

/// Root configuration structure for codesense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodesenseConfig {
    /// Issue detector trigger points
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    /// Score penalty per issue severity
    #[serde(default)]
    pub scoring: SeverityWeights,

    /// Input size limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Report archive settings
    #[serde(default)]
    pub archive: ArchiveConfig,
}

impl CodesenseConfig {
    /// Check every section, reporting the first problem found
    pub fn validate(&self) -> Result<(), String> {
        self.thresholds.validate()?;
        self.scoring.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Snippets larger than this are rejected instead of analyzed
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl LimitsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_bytes == 0 {
            return Err("max_input_bytes must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Store every produced report
    #[serde(default = "default_archive_enabled")]
    pub enabled: bool,

    /// JSON-lines file receiving archived reports
    #[serde(default = "default_archive_path")]
    pub path: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: default_archive_enabled(),
            path: default_archive_path(),
        }
    }
}

fn default_max_input_bytes() -> usize {
    256 * 1024
}
fn default_archive_enabled() -> bool {
    true
}
fn default_archive_path() -> PathBuf {
    PathBuf::from(".codesense").join("reports.jsonl")
}
