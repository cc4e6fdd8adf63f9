//! Configuration management for Soundio
//!
//! This module provides:
//! - Application settings (device snapshot location)
//! - Persisted per-role device preferences
//! - TOML serialization with async load/save
//! - A config manager rooted in the platform config directory

use crate::domain::preferences::{PreferenceSource, SoundPreferences};
use crate::domain::selection::SoundRole;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, error, info, instrument};

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Device snapshot file used when no live backend is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_snapshot: Option<PathBuf>,
}

/// Complete Soundio configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundIoConfig {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub preferences: SoundPreferences,
}

impl SoundIoConfig {
    /// Load configuration from TOML file
    #[instrument(skip(path))]
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading configuration");

        let contents = fs::read_to_string(path).await?;
        let config: Self = toml::from_str(&contents)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Save configuration to TOML file
    #[instrument(skip(self, path))]
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        info!(path = %path.display(), "Saving configuration");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str).await?;

        debug!("Configuration saved successfully");
        Ok(())
    }

    /// Remember `device_name` for `role`
    pub fn prefer(&mut self, role: SoundRole, device_name: &str) -> Result<()> {
        if device_name.is_empty() {
            return Err(ConfigError::Invalid("Device name cannot be empty".to_string()));
        }
        self.preferences.set(role.preference_key(), device_name);
        Ok(())
    }

    /// Saved device name for `role`, if any
    pub fn preferred_device(&self, role: SoundRole) -> Option<&str> {
        self.preferences.name(role.preference_key())
    }

    /// Drop the saved device for `role`
    pub fn forget(&mut self, role: SoundRole) {
        self.preferences.clear(role.preference_key());
    }
}

impl PreferenceSource for SoundIoConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.preferences.get(key)
    }
}

/// Configuration manager for the main Soundio config
///
/// Manages the configuration file at `~/.config/soundio/config.toml`.
pub struct ConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_path = config_dir.join("config.toml");

        Self {
            config_dir,
            config_path,
        }
    }

    /// Manager for an explicit config file path
    pub fn at_path(config_path: PathBuf) -> Self {
        let config_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self {
            config_dir,
            config_path,
        }
    }

    /// Get the default config directory path
    ///
    /// Returns `~/.config/soundio` on Linux, `~/Library/Application Support/soundio`
    /// on macOS and `%APPDATA%\soundio` on Windows.
    pub fn default_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("soundio"))
            .ok_or_else(|| ConfigError::Invalid("Could not determine config directory".to_string()))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from file
    ///
    /// If the config file doesn't exist, returns the default configuration.
    /// If the config file does not parse, logs an error, keeps a `.corrupt`
    /// copy and returns the default configuration. I/O errors are returned.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<SoundIoConfig> {
        if !self.config_path.exists() {
            info!(
                path = %self.config_path.display(),
                "Config file not found, using defaults"
            );
            return Ok(SoundIoConfig::default());
        }

        match SoundIoConfig::load_from_file(&self.config_path).await {
            Err(ConfigError::TomlParse(e)) => {
                error!(
                    path = %self.config_path.display(),
                    error = %e,
                    "Failed to parse config, using defaults"
                );

                let backup_path = self.config_path.with_extension("toml.corrupt");
                if let Err(copy_err) = fs::copy(&self.config_path, &backup_path).await {
                    error!(
                        path = %backup_path.display(),
                        error = %copy_err,
                        "Failed to backup corrupt config"
                    );
                }

                Ok(SoundIoConfig::default())
            }
            other => other,
        }
    }

    #[instrument(skip(self, config))]
    pub async fn save(&self, config: &SoundIoConfig) -> Result<()> {
        fs::create_dir_all(&self.config_dir).await?;

        config.save_to_file(&self.config_path).await
    }

    /// Delete the config file if present
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        if self.config_path.exists() {
            fs::remove_file(&self.config_path).await?;
            info!(
                path = %self.config_path.display(),
                "Configuration cleared"
            );
        }

        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }
}
