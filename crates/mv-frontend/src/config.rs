//! Persistent application configuration
//!
//! Settings are stored as RON under the user's configuration directory
//! (`$XDG_CONFIG_HOME/meshview/config.ron`, or `~/.config/meshview/config.ron`).

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mv_renderer::RendererConfig;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "meshview";
const CONFIG_FILE: &str = "config.ron";

/// Main window settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 900.0,
        }
    }
}

/// Everything persisted between sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub renderer: RendererConfig,
    pub window: WindowConfig,
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
    #[error("No configuration path available")]
    NoPath,
}

/// Owns the configuration and the file it is stored in
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: AppConfig,
    path: Option<PathBuf>,
}

/// Configuration shared between panels
pub type SharedConfig = Arc<RwLock<ConfigManager>>;

impl ConfigManager {
    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let Some(path) = default_config_path() else {
            tracing::warn!("No configuration directory found, using defaults");
            return Self::default();
        };
        Self::load_or_default(path)
    }

    /// Load from `path`, logging and falling back to defaults on error.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load_from(&path) {
            Ok(manager) => manager,
            Err(e) => {
                tracing::error!("Failed to load config from {}: {}", path.display(), e);
                Self {
                    config: AppConfig::default(),
                    path: Some(path),
                }
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
            let mut config: AppConfig =
                ron::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
            config.renderer = config.renderer.sanitized();
            tracing::info!("Loaded config from {}", path.display());
            config
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            AppConfig::default()
        };

        Ok(Self {
            config,
            path: Some(path.to_path_buf()),
        })
    }

    /// Write the configuration to its file, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path.as_ref().ok_or(ConfigError::NoPath)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        let content = ron::ser::to_string_pretty(&self.config, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// Restore default settings. The file is untouched until `save`.
    pub fn reset_to_defaults(&mut self) {
        self.config = AppConfig::default();
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Wrap into a [`SharedConfig`].
    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

/// Default configuration file location.
pub fn default_config_path() -> Option<PathBuf> {
    config_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.filter(|dir| !dir.is_empty())?).join(".config"),
    };
    Some(base.join(APP_DIR).join(CONFIG_FILE))
}
