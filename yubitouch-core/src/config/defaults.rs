//! Default configuration values.
//!
//! These functions are used by `serde`'s `default` attribute in the configuration
//! structures when a key is not present in the configuration file.

use std::path::PathBuf;

/// Returns the default log level string (`"info"`).
pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

/// Returns the default log file path (`None`, console only).
pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

/// Returns the default log format string (`"text"`).
pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_app_name() -> String {
    "yubikey-touch-detector".to_string()
}

pub(crate) fn default_app_icon() -> String {
    "yubikey-touch-detector".to_string()
}

pub(crate) fn default_summary() -> String {
    "YubiKey is waiting for a touch".to_string()
}

pub(crate) fn default_body() -> String {
    String::new()
}

/// `0`: the notification stays until it is closed.
pub(crate) fn default_expire_timeout_ms() -> i32 {
    0
}

/// Capacity of the bounded event queue of a notifier.
pub(crate) fn default_queue_capacity() -> usize {
    10
}
