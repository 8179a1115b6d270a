//! Configuration Management for yubitouch.
//!
//! - [`types`]: the configuration schema ([`CoreConfig`], [`LoggingConfig`],
//!   [`NotifierConfig`]).
//! - [`defaults`]: default values used by `serde` when a key is missing.
//! - [`loader`]: [`ConfigLoader`], which locates, parses and validates the
//!   TOML configuration file.
//!
//! ## Configuration Loading Process:
//!
//! 1. `ConfigLoader::load()` looks for `config.toml` in the application
//!    configuration directory (see `utils::paths`).
//! 2. A missing file yields `CoreConfig::default()`; an explicit path passed to
//!    `ConfigLoader::load_from_path()` must exist.
//! 3. The TOML content is parsed into `CoreConfig`. Errors map to
//!    [`crate::error::ConfigError::ParseError`].
//! 4. The result is validated and normalized (log level, log format, log file
//!    path, notifier values).

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig, NotifierConfig};
