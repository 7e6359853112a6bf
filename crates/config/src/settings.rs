// Application settings
// Loaded from ~/.config/retrocalc/settings.json

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Narrowest column the grid will draw.
pub const MIN_COLUMN_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Grid layout
    #[serde(rename = "grid.columnWidth")]
    pub column_width: usize,

    #[serde(rename = "grid.rowLabelWidth")]
    pub row_label_width: usize,

    // UI
    #[serde(rename = "ui.showWelcome")]
    pub show_welcome: bool,

    // Logging
    #[serde(rename = "log.level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            column_width: 9,
            row_label_width: 3,
            show_welcome: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load settings from `path`. Unreadable or invalid files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "error parsing settings, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), "error reading settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Parse settings text. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        let settings: Settings = serde_json::from_str(&cleaned).map_err(|e| e.to_string())?;
        Ok(settings.normalized())
    }

    fn normalized(mut self) -> Self {
        self.column_width = self.column_width.max(MIN_COLUMN_WIDTH);
        self
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Grid layout (in terminal columns)
    "grid.columnWidth": 9,
    "grid.rowLabelWidth": 3,

    // Title screen before the grid
    "ui.showWelcome": true,

    // Log file verbosity: "error", "warn", "info", "debug", "trace"
    // RUST_LOG overrides this when set
    "log.level": "info"
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            tracing::warn!("error writing default settings.json: {}", e);
        }
    }
}
