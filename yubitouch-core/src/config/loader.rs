//! Configuration Loading for yubitouch.
//!
//! [`ConfigLoader`] locates the configuration file, deserializes it from TOML,
//! applies defaults and validates the result.
//!
//! ```rust,ignore
//! use yubitouch_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("Logging level: {}", config.logging.level),
//!     Err(e) => {
//!         yubitouch_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration loading failed: {}", e);
//!     }
//! }
//! ```
//!
//! ## Configuration File Location
//!
//! `ConfigLoader::load()` reads `config.toml` from
//! [`get_app_config_dir`](crate::utils::paths::get_app_config_dir). A missing file
//! is not an error and yields the default configuration.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as yt_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the user configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DirectoryUnavailable`] if the XDG directories cannot be resolved.
    /// - [`ConfigError::ReadError`] if the file exists but cannot be read.
    /// - [`ConfigError::ParseError`] for invalid TOML or unknown keys.
    /// - [`ConfigError::ValidationError`] for out-of-range values.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let path = Self::default_config_path()?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No configuration file at {:?}, using defaults.", path);
                None
            }
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        };

        let mut config = match content {
            Some(content) => Self::parse(&content)?,
            None => CoreConfig::default(),
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Loads and validates the configuration at an explicit path.
    ///
    /// Unlike [`ConfigLoader::load`], a missing file is an error here.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound { path: path.to_path_buf() }
            } else {
                ConfigError::ReadError { path: path.to_path_buf(), source: e }
            }
        })?;

        let mut config = Self::parse(&content)?;
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Path of the user configuration file.
    pub fn default_config_path() -> Result<PathBuf, CoreError> {
        Ok(get_app_config_dir()?.join(CONFIG_FILE_NAME))
    }

    fn parse(content: &str) -> Result<CoreConfig, ConfigError> {
        if content.trim().is_empty() {
            return Ok(CoreConfig::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Validates the configuration and normalizes it in place.
    ///
    /// - Log level must be one of trace, debug, info, warn, error (lowercased).
    /// - Log format must be text or json (lowercased).
    /// - A relative log file path is made absolute against the state directory,
    ///   and the parent directory of the log file is created.
    /// - The notification summary must not be blank and the queue capacity must
    ///   be at least 1.
    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                config.logging.level = level_lower;
            }
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))
                .into());
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => {
                config.logging.format = format_lower;
            }
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))
                .into());
            }
        }

        if let Some(log_path) = &config.logging.file_path {
            let absolute_path = if log_path.is_absolute() {
                log_path.clone()
            } else {
                get_app_state_dir()?.join(log_path)
            };
            if let Some(parent_dir) = absolute_path.parent() {
                yt_fs::ensure_dir_exists(parent_dir)?;
            }
            config.logging.file_path = Some(absolute_path);
        }

        if config.notifier.summary.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Notification summary must not be empty.".to_string(),
            )
            .into());
        }

        if config.notifier.queue_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "Notifier queue_capacity must be at least 1.".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
