use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[allow(unused_imports)]
use log::{debug, info, warn, error};

use crate::config;

/// User-specific settings that persist across app sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Window width in logical pixels
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Window height in logical pixels
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Snap the strip onto the settled slide's boundary when a drag is
    /// released, instead of leaving it where the pointer let go
    #[serde(default)]
    pub snap_on_release: bool,
}

fn default_window_width() -> u32 {
    config::DEFAULT_WINDOW_WIDTH
}

fn default_window_height() -> u32 {
    config::DEFAULT_WINDOW_HEIGHT
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            window_width: config::DEFAULT_WINDOW_WIDTH,
            window_height: config::DEFAULT_WINDOW_HEIGHT,
            snap_on_release: false,
        }
    }
}

impl UserSettings {
    /// Get the path to the settings file
    /// On macOS: ~/Library/Application Support/filmstrip/settings.yaml
    /// On Linux: ~/.config/filmstrip/settings.yaml
    /// On Windows: C:\Users\<user>\AppData\Roaming\filmstrip\settings.yaml
    pub fn settings_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));

        config_dir.join(config::APP_NAME).join("settings.yaml")
    }

    /// Load settings from the YAML file
    /// If custom_path is provided, uses that path; otherwise uses the default settings path
    pub fn load(custom_path: Option<&str>) -> Self {
        let path = match custom_path {
            Some(p) => {
                info!("Using custom settings path: {}", p);
                PathBuf::from(p)
            }
            None => Self::settings_path(),
        };

        if !path.exists() {
            info!("Settings file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_yaml::from_str::<UserSettings>(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    debug!(
                        "Settings: window={}x{}, snap_on_release={}",
                        settings.window_width, settings.window_height, settings.snap_on_release
                    );
                    settings
                }
                Err(e) => {
                    error!("Failed to parse settings file at {:?}: {}", path, e);
                    warn!("Using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read settings file at {:?}: {}", path, e);
                warn!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to the YAML file
    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create settings directory: {}", e))?;
            }
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        fs::write(&path, yaml).map_err(|e| format!("Failed to write settings file: {}", e))?;

        info!("Saved settings to {:?}", path);
        Ok(())
    }
}
