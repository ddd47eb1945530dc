use serde::{Deserialize, Serialize};

/// Trigger points for the issue detector rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    /// Lines longer than this many characters are reported
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Complexity proxy above this raises a high severity issue
    #[serde(default = "default_complexity_high")]
    pub complexity_high: u32,

    /// Complexity proxy above this (and not above `complexity_high`) raises a medium issue
    #[serde(default = "default_complexity_medium")]
    pub complexity_medium: u32,

    /// Documentation rule only applies with more code lines than this
    #[serde(default = "default_documentation_min_code_lines")]
    pub documentation_min_code_lines: usize,

    /// Comment percentage under which the documentation rule fires
    #[serde(default = "default_documentation_min_comment_percentage")]
    pub documentation_min_comment_percentage: f64,

    /// Number of print/log calls at which debug output is reported
    #[serde(default = "default_debug_output_min")]
    pub debug_output_min: usize,

    /// Indentation depth above this is reported as deep nesting
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            complexity_high: default_complexity_high(),
            complexity_medium: default_complexity_medium(),
            documentation_min_code_lines: default_documentation_min_code_lines(),
            documentation_min_comment_percentage: default_documentation_min_comment_percentage(),
            debug_output_min: default_debug_output_min(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

impl ThresholdsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.complexity_medium >= self.complexity_high {
            return Err(format!(
                "complexity_medium ({}) must be lower than complexity_high ({})",
                self.complexity_medium, self.complexity_high
            ));
        }
        if !(0.0..=100.0).contains(&self.documentation_min_comment_percentage) {
            return Err(format!(
                "documentation_min_comment_percentage must be within 0-100, got {}",
                self.documentation_min_comment_percentage
            ));
        }
        if self.max_line_length == 0 {
            return Err("max_line_length must be positive".to_string());
        }
        Ok(())
    }
}

fn default_max_line_length() -> usize {
    100
}
fn default_complexity_high() -> u32 {
    18
}
fn default_complexity_medium() -> u32 {
    10
}
fn default_documentation_min_code_lines() -> usize {
    30
}
fn default_documentation_min_comment_percentage() -> f64 {
    15.0
}
fn default_debug_output_min() -> usize {
    3
}
fn default_max_nesting_depth() -> usize {
    5
}
