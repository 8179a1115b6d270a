//! Logging setup for yubitouch.
//!
//! Built on the `tracing` ecosystem: a console layer on stdout plus an optional
//! daily-rolling file layer, each in text or JSON format.

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initializes a minimal logging setup on `stderr`.
///
/// Meant for early startup before the configuration is loaded, and as a
/// fallback when it cannot be. Honors `RUST_LOG`, defaulting to "info".
/// Errors (e.g. a global subscriber already set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Maps a configured level name to a filter directive.
fn level_directive(level: &str) -> Result<String, LoggingError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE.to_string()),
        "debug" => Ok(Level::DEBUG.to_string()),
        "info" => Ok(Level::INFO.to_string()),
        "warn" => Ok(Level::WARN.to_string()),
        "error" => Ok(Level::ERROR.to_string()),
        invalid_level => Err(LoggingError::InitializationFailure(format!(
            "Invalid log level in config: {}",
            invalid_level
        ))),
    }
}

/// Creates a daily-rolling file layer and the guard that flushes it.
fn create_file_layer(log_path: &Path, format: &str) -> Result<(BoxedLayer, WorkerGuard), CoreError> {
    let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
    utils::fs::ensure_dir_exists(directory)?;

    let file_appender = tracing_appender::rolling::daily(
        directory,
        log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("yubitouch.log")),
    );
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer = match format.to_lowercase().as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .boxed(),
        _ => fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .boxed(),
    };
    Ok((layer, guard))
}

/// Keeps the file writer alive for the lifetime of the process.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes the global logging system from a [`LoggingConfig`].
///
/// With `is_reload` set, a failure to install the subscriber (because one is
/// already installed) is reported on stderr instead of returned.
///
/// # Errors
///
/// [`LoggingError::InitializationFailure`] for an invalid level or when the
/// global subscriber cannot be set on initial setup; [`CoreError::Filesystem`]
/// if the log directory cannot be created.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let directive = level_directive(&config.level)?;

    let stdout_layer = match config.format.to_lowercase().as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(stdout)
            .with_ansi(false)
            .with_filter(EnvFilter::new(directive.clone()))
            .boxed(),
        _ => fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_filter(EnvFilter::new(directive.clone()))
            .boxed(),
    };

    let mut layers: Vec<BoxedLayer> = vec![stdout_layer];
    let mut new_file_guard: Option<WorkerGuard> = None;
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &config.format)?;
        layers.push(file_layer.with_filter(EnvFilter::new(directive)).boxed());
        new_file_guard = Some(guard);
    }

    let result = Registry::default().with(layers).try_init();

    match LOG_WORKER_GUARD.lock() {
        Ok(mut guard_slot) => *guard_slot = new_file_guard,
        Err(e) => {
            eprintln!(
                "[ERROR] Failed to lock LOG_WORKER_GUARD to update: {}. Log flushing may be affected.",
                e
            );
        }
    }

    match result {
        Ok(()) => Ok(()),
        Err(e) if !is_reload => Err(LoggingError::InitializationFailure(format!(
            "Failed to set global tracing subscriber. Was it already initialized? Error: {}",
            e
        ))
        .into()),
        Err(e) => {
            eprintln!(
                "[INFO] Re-initializing logging configuration attempted. Previous logger may persist. Error: {}",
                e
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_minimal_logging_runs_without_panic() {
        init_minimal_logging();
        init_minimal_logging();
        tracing::info!("Minimal logging test: Info message after init_minimal_logging.");
    }

    #[test]
    fn test_level_directive_accepts_known_levels() {
        for level in ["trace", "DEBUG", "Info", "warn", "error"] {
            assert!(level_directive(level).is_ok(), "level {} rejected", level);
        }
    }

    #[test]
    fn test_init_logging_rejects_invalid_level() {
        let config = LoggingConfig { level: "loud".to_string(), ..LoggingConfig::default() };
        match init_logging(&config, false) {
            Err(CoreError::Logging(LoggingError::InitializationFailure(msg))) => {
                assert!(msg.contains("loud"));
            }
            other => panic!("Expected InitializationFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_create_file_layer_text_format() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("nested").join("test_text.log");

        let result = create_file_layer(&log_path, "text");
        assert!(result.is_ok(), "create_file_layer failed for text format: {:?}", result.err());
        assert!(log_path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_create_file_layer_json_format() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test_json.log");

        let result = create_file_layer(&log_path, "json");
        assert!(result.is_ok(), "create_file_layer failed for json format: {:?}", result.err());
    }
}
