//! Logging setup with `tracing` and `tracing-subscriber`.
//!
//! The UI owns the terminal, so nothing is ever written to stdout or stderr:
//! events go to `--log-file` when one is given and are discarded otherwise.
//!
//! # Log Levels
//!
//! - `warn`: failed fetches
//! - `info`: startup configuration
//! - `debug`: requests sent, stale responses dropped, runtime lifecycle
//! - `trace`: everything else
//!
//! `RUST_LOG` overrides the level picked from `-v`.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Cli;
use crate::error::AppError;

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl LogConfig {
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+ (`-vvv`): trace
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level,
            log_file: None,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            log_file: cli.log_file.clone(),
            ..Self::from_verbosity(cli.verbose)
        }
    }
}

/// Install the global subscriber. Without a log file this is a no-op.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(config: &LogConfig) -> Result<(), AppError> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = open_log_file(path)?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);
    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()?;
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File, AppError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn build_env_filter(level: LevelFilter) -> EnvFilter {
    // Dependencies (hyper, reqwest) stay at warn unless RUST_LOG says otherwise.
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,shelf={level},shelf_core={level},shelf_client={level},shelf_widgets={level}",
            level = level.to_string().to_lowercase()
        ))
    })
}
