//! XDG Base Directory and Application-Specific Path Resolution.
//!
//! Built on `directories-next`. All functions return
//! [`ConfigError::DirectoryUnavailable`] (wrapped in [`CoreError`]) when the
//! directory cannot be determined, typically because `HOME` is not set.
//!
//! - [`get_app_config_dir()`]: e.g. `~/.config/yubitouch`.
//! - [`get_state_base_dir()`]: `$XDG_STATE_HOME` (e.g. `~/.local/state`).
//! - [`get_app_state_dir()`]: e.g. `~/.local/state/yubitouch`.

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "yubitouch";
const APPLICATION: &str = "yubitouch";

fn project_dirs(dir_type: &str) -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: dir_type.to_string(),
        })
    })
}

/// Returns the application-specific configuration directory.
///
/// # Examples
/// ```
/// match yubitouch_core::utils::paths::get_app_config_dir() {
///     Ok(path) => println!("Config directory: {}", path.display()),
///     Err(e) => eprintln!("Error getting config dir: {}", e),
/// }
/// ```
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    Ok(project_dirs("App Config")?.config_dir().to_path_buf())
}

/// Returns the base directory for user-specific state files.
///
/// On Linux this is `$XDG_STATE_HOME`, falling back to `$HOME/.local/state`.
/// Other platforms use the local data directory.
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "State Base".to_string(),
            })
        })
}

/// Returns the application-specific state directory, used for log files.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    // ProjectDirs has no state directory of its own.
    get_state_base_dir().map(|base| base.join(APPLICATION))
}
