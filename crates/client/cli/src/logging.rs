//! Tracing setup for the viewer.
//!
//! The TUI owns the terminal, so the interactive viewer logs only to a file
//! under a per-session directory. `dump` writes plain output to stdout and logs
//! to stderr.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE_NAME: &str = "viewer.log";

/// Platform cache directory for viewer logs, `/tmp/target-viewer/logs` as fallback.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "target-viewer")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/target-viewer"))
        .join("logs")
}

/// Installs a file-only subscriber and returns the session log path.
pub fn setup_file_logging(session_id: Option<&str>) -> Result<PathBuf> {
    let session_id = session_id.map(str::to_owned).unwrap_or_else(default_session_id);

    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();

    // Keep the writer alive for the rest of the process.
    std::mem::forget(guard);

    let log_path = session_log_dir.join(LOG_FILE_NAME);
    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}", log_path.display());

    Ok(log_path)
}

/// Installs a stderr subscriber for non-interactive commands.
pub fn setup_stderr_logging() {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .init();
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

fn default_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{}", timestamp)
}
