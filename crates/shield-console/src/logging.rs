//! Tracing subscriber setup.
//!
//! The interactive console owns the terminal, so logs go to a daily file
//! under the config directory unless stderr is requested.

use shield_infrastructure::ShieldPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_FILE_PREFIX: &str = "crowd-shield.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer and must be held until exit.
/// Falls back to stderr when the log directory cannot be created.
pub fn init(log_stderr: bool) -> Option<WorkerGuard> {
    if !log_stderr
        && let Ok(logs_dir) = ShieldPaths::logs_dir()
        && std::fs::create_dir_all(&logs_dir).is_ok()
    {
        let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false),
            )
            .init();
        tracing::info!("[Console] Logging to {}", logs_dir.display());
        return Some(guard);
    }

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
    None
}
