//! Process-wide logging setup
//!
//! Installs the global tracing subscriber once at startup: a console layer in
//! the configured format plus a non-blocking, daily-rotating file appender
//! writing `embeddingsapi.log` files. Lives for the process duration and is
//! never torn down explicitly; the returned guard flushes buffered log lines
//! on drop and must be held by `main`.

use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Rotating log file prefix (produces `embeddingsapi.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "embeddingsapi.log";

/// Initialize the global subscriber from configuration
///
/// Panics if a global subscriber is already set; call once from `main`.
pub fn init(config: &LoggingConfig) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(&config.dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(file_writer);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().with_target(false).json())
            .init(),
        "compact" => registry
            .with(fmt::layer().with_target(false).compact())
            .init(),
        _ => registry.with(fmt::layer().with_target(false)).init(),
    }

    guard
}
