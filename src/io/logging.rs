use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

pub const LOG_FILE_PREFIX: &str = "taskdeck.log";

/// Pick the filter: `RUST_LOG` when it parses, else the configured level,
/// else `info`.
pub fn build_filter(env_directive: Option<&str>, config: &LogConfig) -> EnvFilter {
    env_directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(&config.level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Route `tracing` output to a daily rolling file under `log_dir`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout/stderr.
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes and stops the background writer.
pub fn init_tracing(log_dir: &Path, config: &LogConfig) -> Result<WorkerGuard, String> {
    std::fs::create_dir_all(log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(env.as_deref(), config))
        .with_ansi(false)
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())?;
    Ok(guard)
}
