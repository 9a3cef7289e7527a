//! Logging setup
//!
//! Human-readable output on stderr; with a log directory, a daily rolling
//! file as well.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter for a verbosity count (`-v`, `-vv`, ...)
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,meja_client=info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
///
/// Keep the returned guard alive until exit so buffered file output is
/// flushed.
pub fn init_logger(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(dir) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        tracing::warn!(dir = %dir.display(), "Cannot create log directory, logging to stderr only: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(dir, "meja.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Some(guard)
}
