//! File logging for the terminal client.
//!
//! The terminal is the UI, so log output never goes to stdout or stderr.
use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform-specific log directory.
///
/// - macOS: `~/Library/Caches/leaderboard/logs`
/// - Linux: `~/.cache/leaderboard/logs` (or `$XDG_CACHE_HOME/leaderboard/logs`)
/// - Windows: `%LOCALAPPDATA%\leaderboard\logs`
/// - Fallback: `/tmp/leaderboard/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "leaderboard")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/leaderboard"))
        .join("logs")
}

/// Install the global subscriber writing to `client.log` in `log_dir`.
///
/// Filtering follows `RUST_LOG`, with `info` added on top.
pub fn setup_logging(log_dir: Option<PathBuf>) -> Result<PathBuf> {
    let log_dir = log_dir.unwrap_or_else(self::log_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    // Keep the background writer alive for the rest of the process.
    std::mem::forget(guard);

    let log_file = log_dir.join("client.log");
    tracing::info!("Log file: {}", log_file.display());

    Ok(log_file)
}
