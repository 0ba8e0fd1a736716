//! Path resolution for the gphotos config directory.
//!
//! The config directory holds `config.ini` (OAuth client + tokens) and a
//! `logs/` subdirectory with one log file per run.

use std::path::{Path, PathBuf};

/// Return the OS-native gphotos config directory (`~/.config/gphotos` on Linux).
pub fn default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "gphotos") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        home_dir().join(".config").join("gphotos")
    }
}

/// Return the credential store path inside a config directory.
pub fn config_file(config_dir: &Path) -> PathBuf {
    config_dir.join("config.ini")
}

/// Return the log directory inside a config directory.
pub fn logs_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("logs")
}

/// Get the user's home directory.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand ~ to home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// clap value parser for `--config_path`: expand `~` and require an existing directory.
pub fn existing_dir(raw: &str) -> Result<PathBuf, String> {
    let path = expand_tilde(raw);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("directory '{}' does not exist", path.display()))
    }
}
