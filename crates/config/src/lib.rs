// Configuration loading

pub mod settings;

use std::path::PathBuf;

/// Application config directory (`~/.config/retrocalc` on Linux).
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("retrocalc")
}

/// Directory for rolling log files.
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}
