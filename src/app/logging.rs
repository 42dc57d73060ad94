use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JUMP_LOG";

/// Builds the filter from `JUMP_LOG`, falling back to the configured level.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level))
}

/// Routes `tracing` output to `file`. Stdout belongs to the terminal UI, so
/// without a file nothing is logged.
pub fn init(level: &str, file: Option<&Path>) -> Result<()> {
    let Some(path) = file else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}
