use anyhow::{Context, Result};
use codesense::cli::{Cli, Commands};
use codesense::commands::{self, AnalyzeConfig, BatchConfig, HistoryConfig};
use codesense::config::{load_config, load_config_from, CodesenseConfig};
use codesense::observability::init_logging;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = codesense::cli::parse_args();
    init_logging(cli.verbosity);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(commands::exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            input,
            code,
            format,
            output,
            no_archive,
        } => {
            let settings = resolve_config(cli.config.as_deref())?;
            commands::handle_analyze(AnalyzeConfig {
                input,
                code,
                format: format.into(),
                output,
                no_archive,
                settings,
            })?;
        }
        Commands::Batch {
            paths,
            format,
            output,
        } => {
            let settings = resolve_config(cli.config.as_deref())?;
            commands::handle_batch(BatchConfig {
                paths,
                format: format.into(),
                output,
                settings,
            })?;
        }
        Commands::History {
            limit,
            format,
            output,
        } => {
            let settings = resolve_config(cli.config.as_deref())?;
            commands::handle_history(HistoryConfig {
                archive_path: settings.archive.path,
                limit,
                format: format.into(),
                output,
            })?;
        }
        Commands::Init { force } => {
            commands::init_config(Path::new("."), force)?;
        }
    }
    Ok(())
}

/// An explicit `--config` must load; discovery falls back to defaults.
fn resolve_config(explicit: Option<&Path>) -> Result<CodesenseConfig> {
    match explicit {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_config()),
    }
}
