//! Logging setup
//!
//! The TUI owns stdout/stderr, so log lines go to a file:
//! `~/.local/share/trailertui/trailertui.log`.
//!
//! Level is taken from `RUST_LOG`, then the config's `log_level`,
//! then defaults to `info`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

const LOG_FILE: &str = "trailertui.log";

/// Directory holding the log file
pub fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("trailertui"))
}

/// Build the filter from `RUST_LOG` or the configured level
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.log_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global subscriber. Returns the log file path when logging
/// was set up; failures are silent since logging is optional.
pub fn init_logging(config: &Config) -> Option<PathBuf> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(path)
}
