//! Platform-specific preset locations.
//!
//! User presets live under the platform config directory:
//!
//! - Linux: `~/.config/aura/presets/`
//! - macOS: `~/Library/Application Support/aura/presets/`
//! - Windows: `%APPDATA%\aura\presets\`
//!
//! ```rust,no_run
//! use aura_config::paths;
//!
//! if let Some(path) = paths::find_preset("my_hall") {
//!     println!("Found preset at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "aura";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user presets directory.
///
/// Falls back to `./aura/presets` if the config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Ensure the user presets directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// File name for a preset name, adding `.toml` when missing.
pub fn preset_file_name(name: &str) -> String {
    if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{}.toml", name)
    }
}

/// Find a preset file by path or name.
///
/// Existing file paths are returned as-is; otherwise the name (with or
/// without `.toml`) is looked up in the user presets directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let candidate = dir.join(preset_file_name(name));
    candidate.is_file().then_some(candidate)
}

/// List all preset files in the user presets directory, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Delete a user preset by name.
///
/// # Errors
///
/// [`ConfigError::PresetNotFound`] if no such file exists in the user
/// presets directory, [`ConfigError::DeleteFile`] if removal fails.
pub fn delete_user_preset(name: &str) -> Result<PathBuf, ConfigError> {
    delete_preset_in(name, &user_presets_dir())
}

fn delete_preset_in(name: &str, dir: &Path) -> Result<PathBuf, ConfigError> {
    let path = dir.join(preset_file_name(name));
    if !path.is_file() {
        return Err(ConfigError::PresetNotFound(name.to_string()));
    }
    std::fs::remove_file(&path).map_err(|e| ConfigError::delete_file(&path, e))?;
    tracing::info!(path = %path.display(), "user preset deleted");
    Ok(path)
}

/// Get the preset name from a file path (the file stem).
///
/// ```rust
/// use aura_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/big_hall.toml"));
/// assert_eq!(name, Some("big_hall".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
