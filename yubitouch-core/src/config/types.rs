//! Configuration Data Structures for yubitouch.
//!
//! # Key Structs
//! - [`CoreConfig`]: The root configuration structure.
//! - [`LoggingConfig`]: Configuration of the logging subsystem.
//! - [`NotifierConfig`]: Content of the desktop notification and the size of
//!   the notifier's event queue.
//!
//! Every field has a default from [`super::defaults`], and unknown keys are
//! rejected via `#[serde(deny_unknown_fields)]`.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// # Examples
///
/// ```
/// use yubitouch_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/yubitouch.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/yubitouch.log")));
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The minimum log level to record.
    /// Valid values (case-insensitive): "trace", "debug", "info", "warn", "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional path to a log file. `None` disables file logging.
    /// Relative paths are resolved against the application's state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// Log line format: "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_log_level(),
            file_path: defaults::default_log_file_path(),
            format: defaults::default_log_format(),
        }
    }
}

/// Settings of the desktop notifier.
///
/// The notification content is fixed for the lifetime of the process: the
/// same app name, icon and summary are sent for every touch request,
/// whichever source triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifierConfig {
    /// Application name reported to the notification server.
    #[serde(default = "defaults::default_app_name")]
    pub app_name: String,
    /// Icon name or path.
    #[serde(default = "defaults::default_app_icon")]
    pub app_icon: String,
    /// Single line summary. Must not be empty.
    #[serde(default = "defaults::default_summary")]
    pub summary: String,
    #[serde(default = "defaults::default_body")]
    pub body: String,
    /// Expiry in milliseconds; `-1` means server default, `0` never expires.
    #[serde(default = "defaults::default_expire_timeout_ms")]
    pub expire_timeout_ms: i32,
    /// Capacity of the bounded event queue. Must be at least 1.
    #[serde(default = "defaults::default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            app_name: defaults::default_app_name(),
            app_icon: defaults::default_app_icon(),
            summary: defaults::default_summary(),
            body: defaults::default_body(),
            expire_timeout_ms: defaults::default_expire_timeout_ms(),
            queue_capacity: defaults::default_queue_capacity(),
        }
    }
}

/// Root configuration structure.
///
/// Missing sections fall back to their `Default` implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}
