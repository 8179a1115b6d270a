//! # yubitouch Core Library (`yubitouch-core`)
//!
//! `yubitouch-core` is the foundational layer of the yubitouch workspace. It holds
//! everything the notifier needs that is not specific to a notification transport:
//!
//! - **Error Handling**: [`CoreError`] and its specific error types [`ConfigError`]
//!   and [`LoggingError`].
//! - **Touch Events**: the closed set of [`TouchEvent`] tags emitted by touch
//!   detectors (GPG, U2F, HMAC) and their on/off pairing.
//! - **Configuration Management**: TOML-based loading of [`CoreConfig`] through
//!   [`ConfigLoader`], with defaults for every field.
//! - **Logging**: `tracing` subscriber setup driven by [`LoggingConfig`].
//! - **Utilities**: XDG path resolution and small filesystem helpers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use yubitouch_core::config::ConfigLoader;
//! use yubitouch_core::logging::init_logging;
//! use yubitouch_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     init_logging(&config.logging, false)?;
//!
//!     tracing::info!("yubitouch core initialized.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use config::{ConfigLoader, CoreConfig, LoggingConfig, NotifierConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::{ParseTouchEventError, TouchEvent, TouchSource};
