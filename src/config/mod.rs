// Sub-modules
mod scoring;
mod thresholds;

// Core configuration types
mod core;
mod loader;

pub use scoring::{
    default_critical_weight, default_high_weight, default_info_weight, default_low_weight,
    default_medium_weight, SeverityWeights,
};

pub use thresholds::ThresholdsConfig;

pub use core::{ArchiveConfig, CodesenseConfig, LimitsConfig};

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
