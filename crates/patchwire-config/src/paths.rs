//! Platform-specific paths for racks and configuration.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/patchwire/` (Linux), `~/Library/Application Support/patchwire/` (macOS), `%APPDATA%\patchwire\` (Windows)
//! - **User racks**: `racks/` inside the user config directory
//! - **Settings**: `settings.toml` inside the user config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use patchwire_config::paths;
//!
//! // Find a rack by name (current directory first, then the user racks directory)
//! if let Some(path) = paths::find_rack("modular") {
//!     println!("Found rack at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "patchwire";

/// Subdirectory name for racks.
const RACKS_SUBDIR: &str = "racks";

/// File name of the user settings.
const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific racks directory.
pub fn user_racks_dir() -> PathBuf {
    user_config_dir().join(RACKS_SUBDIR)
}

/// Returns the path of the user settings file.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Find a rack file by name.
///
/// The name can be a path to a TOML file, or a rack name (with or without
/// `.toml`) looked up in [`user_racks_dir()`].
pub fn find_rack(name: &str) -> Option<PathBuf> {
    find_rack_in(name, &user_racks_dir())
}

fn find_rack_in(name: &str, racks_dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };
    let candidate = racks_dir.join(filename);
    candidate.is_file().then_some(candidate)
}

/// Ensure the user racks directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_racks_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_racks_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List all rack files in the user racks directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_racks() -> Vec<PathBuf> {
    list_racks_in_dir(&user_racks_dir())
}

fn list_racks_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut racks: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    racks.sort();
    racks
}

/// Get the rack name from a file path (the file stem).
///
/// # Example
///
/// ```rust
/// use patchwire_config::paths::rack_name_from_path;
/// use std::path::Path;
///
/// let name = rack_name_from_path(Path::new("/path/to/modular.toml"));
/// assert_eq!(name, Some("modular".to_string()));
/// ```
pub fn rack_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
