//! Path manipulation utilities for Zellij sandbox environment.
//!
//! This module provides functions for working with filesystem paths in the Zellij
//! plugin sandbox, where the host filesystem is mounted under `/host`. It handles
//! tilde expansion for user-supplied paths and the location of the trace file.

use std::path::PathBuf;

/// Name of the OTLP trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "bookshelf-otlp.json";

/// Returns the data directory for Bookshelf traces.
///
/// The directory is located at `/host/.local/share/zellij/bookshelf` in the Zellij
/// sandbox. In Zellij's plugin environment, `/host` points to the cwd of the last
/// focused terminal, or the folder where Zellij was started if that's not available.
///
/// This typically resolves to the user's home directory when Zellij is started from
/// a home directory terminal, making the actual path `~/.local/share/zellij/bookshelf`.
///
/// # Examples
///
/// ```
/// use bookshelf::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/bookshelf");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookshelf")
}

/// Full path of the trace export file.
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// In the Zellij sandbox environment, the host's home directory (`~`) maps to `/host`.
/// This function converts tilde-prefixed paths to their sandbox equivalents.
///
/// # Examples
///
/// ```
/// use bookshelf::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
