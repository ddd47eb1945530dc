//! CLI command implementations.
//!
//! - **analyze**: analyze one snippet and archive the report
//! - **batch**: analyze many files in parallel
//! - **history**: list archived reports
//! - **init**: write a default `.codesense.toml`
//!
//! Handlers return `anyhow::Result`; [`exit_code`] maps a failure to the
//! process exit status.

pub mod analyze;
pub mod batch;
pub mod history;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use batch::{handle_batch, BatchConfig};
pub use history::{handle_history, HistoryConfig};
pub use init::init_config;

use crate::core::Error;

/// Exit status for input the caller got wrong (empty or oversized snippet)
pub const EXIT_CLIENT_ERROR: u8 = 2;
/// Exit status for every other failure
pub const EXIT_FAILURE: u8 = 1;

pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(inner) if inner.is_client_error() => EXIT_CLIENT_ERROR,
        _ => EXIT_FAILURE,
    }
}
