//! Score penalties per issue severity

use crate::core::Severity;
use serde::{Deserialize, Serialize};

/// Points deducted from the score for each issue of a severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityWeights {
    #[serde(default = "default_critical_weight")]
    pub critical: u32,

    #[serde(default = "default_high_weight")]
    pub high: u32,

    #[serde(default = "default_medium_weight")]
    pub medium: u32,

    #[serde(default = "default_low_weight")]
    pub low: u32,

    #[serde(default = "default_info_weight")]
    pub info: u32,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            critical: default_critical_weight(),
            high: default_high_weight(),
            medium: default_medium_weight(),
            low: default_low_weight(),
            info: default_info_weight(),
        }
    }
}

impl SeverityWeights {
    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }

    // Pure function: a more severe issue must never cost less than a milder one
    pub fn validate(&self) -> Result<(), String> {
        let ordered = [self.critical, self.high, self.medium, self.low, self.info];
        if ordered.windows(2).all(|pair| pair[0] >= pair[1]) {
            Ok(())
        } else {
            Err(format!(
                "Severity weights must not increase as severity decreases, got {:?}",
                ordered
            ))
        }
    }
}

pub fn default_critical_weight() -> u32 {
    40
}
pub fn default_high_weight() -> u32 {
    25
}
pub fn default_medium_weight() -> u32 {
    15
}
pub fn default_low_weight() -> u32 {
    7
}
pub fn default_info_weight() -> u32 {
    2
}
