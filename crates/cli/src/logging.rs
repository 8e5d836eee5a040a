//! Logging utilities for CLI commands and the TUI

use formbench_core::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize logging for CLI commands (console only)
pub fn init_cli_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
    .init();
}

/// Parse log level from config string
fn parse_log_level(level: &str) -> tracing::Level {
  match level.to_lowercase().as_str() {
    "off" | "error" => tracing::Level::ERROR,
    "warn" => tracing::Level::WARN,
    "info" => tracing::Level::INFO,
    "debug" => tracing::Level::DEBUG,
    "trace" => tracing::Level::TRACE,
    _ => tracing::Level::INFO,
  }
}

/// Initialize file logging for the TUI with config-driven settings.
///
/// The TUI owns stdout, so logs go to a rolling file in the data directory
/// (no ANSI). If the directory cannot be created, logging stays uninitialized.
///
/// Returns the guard that must be kept alive for the duration of the program
pub fn init_tui_logging(config: &Config) -> Option<WorkerGuard> {
  let level = parse_log_level(&config.log.level);

  // Build env filter (allows RUST_LOG override)
  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let log_dir = config.data_dir();
  if std::fs::create_dir_all(&log_dir).is_err() {
    return None;
  }

  let file_appender = match config.log.rotation.as_str() {
    "hourly" => tracing_appender::rolling::hourly(&log_dir, "formbench.log"),
    "never" => tracing_appender::rolling::never(&log_dir, "formbench.log"),
    _ => tracing_appender::rolling::daily(&log_dir, "formbench.log"),
  };

  let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(true)
    .with_ansi(false)
    .with_writer(file_writer)
    .init();

  Some(guard)
}
