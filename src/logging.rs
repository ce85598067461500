use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Paths;

/// Send tracing output to the log file in the data directory. The terminal
/// belongs to the TUI while it runs, so nothing is written to stderr.
///
/// `RUST_LOG` wins over `level` when it is set.
pub fn init(paths: &Paths, level: &str) -> Result<()> {
    fs::create_dir_all(&paths.data_dir).context("failed to create data directory")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log)
        .with_context(|| format!("failed to open log file {}", paths.log.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{level}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
