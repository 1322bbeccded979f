use crate::constants::LOG_FILE_PREFIX;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging, plus JSON file logging when `log_dir` is given.
///
/// Console output goes to stderr; progress lines stay on stdout.
/// The returned guard must be held until exit so buffered file logs are flushed.
pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Respect RUST_LOG if set; otherwise info for our crate, warn for everything else
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("inventory_reports=info,warn"));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            // Ensure logs directory exists
            let _ = fs::create_dir_all(dir);

            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
