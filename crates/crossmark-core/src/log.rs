//! Logging setup built on `tracing`.
//!
//! Warnings and errors always go to stderr (`RUST_LOG` overrides the
//! level). When file logging is enabled, events at the configured level
//! are also written to `~/.config/crossmark/logs/crossmark.log`, rotated
//! daily.

use std::fs;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_FILE_NAME: &str = "crossmark.log";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum level for the log file: "trace", "debug", "info", "warn"
    /// or "error".
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
        }
    }
}

/// Parses a level name, falling back to `INFO` for anything unknown.
pub fn parse_level(s: &str) -> LevelFilter {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// `verbose` raises stderr output to debug level. The returned guard
/// flushes the log file when dropped, so keep it alive until exit.
pub fn init(config: &LogConfig, verbose: bool) -> Option<WorkerGuard> {
    let stderr_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let (file_layer, guard) = match file_writer(config) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(parse_level(&config.level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}

fn file_writer(
    config: &LogConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !config.enabled {
        return None;
    }
    let log_dir = crate::config::config_dir()?.join("logs");
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: cannot create {}: {e}", log_dir.display());
        return None;
    }
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    Some(tracing_appender::non_blocking(appender))
}
