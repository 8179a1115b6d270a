//! Utility functions for yubitouch.
//!
//! - [`paths`]: XDG directory resolution for configuration and state files.
//! - [`fs`]: filesystem helpers returning [`crate::error::CoreError`].

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
