use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LaunchpadConfig;

const LOG_FILE_PREFIX: &str = "launchpad";

const DEFAULT_CRATE_LEVELS: &str =
    "launchpad_app=debug,launchpad_wallet=debug,launchpad_ui=debug,launchpad_core=debug";

/// Where log files go, the fallback filter, and whether to echo to the console.
/// `RUST_LOG` overrides the filter when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub dir: PathBuf,
    pub filter: String,
    pub console: bool,
}

impl LogSettings {
    /// `~/.launchpad/logs`, the configured level, console on.
    pub fn from_config(config: &LaunchpadConfig) -> Result<Self> {
        Ok(Self {
            dir: LaunchpadConfig::logs_dir()?,
            filter: default_filter(&config.log_level),
            console: true,
        })
    }

    /// File-only logging to `dir`.
    pub fn in_dir(dir: &Path, filter: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            filter: filter.to_string(),
            console: false,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }
}

/// Install the global subscriber: a daily rolling file plus a compact
/// console layer. The returned guard flushes the file writer on drop and must
/// outlive the app.
pub fn init_logging(config: &LaunchpadConfig) -> Result<WorkerGuard> {
    install(&LogSettings::from_config(config)?)
}

/// File-only logging into `logs_dir`, for tests and embedding.
pub fn init_logging_to_dir(logs_dir: &Path, filter: &str) -> Result<WorkerGuard> {
    install(&LogSettings::in_dir(logs_dir, filter))
}

fn install(settings: &LogSettings) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&settings.dir)
        .with_context(|| format!("creating log directory {}", settings.dir.display()))?;

    let appender = tracing_appender::rolling::daily(&settings.dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(writer);
    let console_layer = settings
        .console
        .then(|| fmt::layer().with_target(false).compact());

    tracing_subscriber::registry()
        .with(settings.env_filter())
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("failed to install logging subscriber")?;

    Ok(guard)
}

/// Global level from config plus debug for the workspace crates.
fn default_filter(level: &str) -> String {
    let level = if level.trim().is_empty() { "info" } else { level.trim() };
    format!("{level},{DEFAULT_CRATE_LEVELS}")
}
