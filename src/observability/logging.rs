//! Process-wide subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter (`EnvFilter` syntax)
pub const LOG_ENV_VAR: &str = "CODESENSE_LOG";

/// Filter directive for a `-v` count: 0 → warn, 1 → info, 2+ → debug
pub fn filter_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber writing to stderr.
///
/// `CODESENSE_LOG` wins over the verbosity flag when set. `log` records are
/// bridged into the subscriber. Calling this twice is harmless.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(filter_for_verbosity(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
