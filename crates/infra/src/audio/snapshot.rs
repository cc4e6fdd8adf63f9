//! Device lists stored as TOML
//!
//! ```toml
//! [[device]]
//! name = "Built-in Microphone"
//! input_channels = 1
//! built_in = true
//!
//! [[device]]
//! name = "Built-in Output"
//! output_channels = 2
//! built_in = true
//! ```
//!
//! Entry order is kept: it decides which built-in device is the fallback.

use serde::{Deserialize, Serialize};
use soundio_core::domain::audio::{AudioError, DeviceSource, Result, SystemAudioDevice};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub name: String,
    #[serde(default)]
    pub input_channels: u32,
    #[serde(default)]
    pub output_channels: u32,
    #[serde(default)]
    pub built_in: bool,
}

impl From<DeviceEntry> for SystemAudioDevice {
    fn from(entry: DeviceEntry) -> Self {
        SystemAudioDevice::new(
            entry.name,
            entry.input_channels,
            entry.output_channels,
            entry.built_in,
        )
    }
}

impl From<&SystemAudioDevice> for DeviceEntry {
    fn from(device: &SystemAudioDevice) -> Self {
        Self {
            name: device.name.clone(),
            input_channels: device.input_channel_count,
            output_channels: device.output_channel_count,
            built_in: device.is_built_in,
        }
    }
}

/// On-disk device list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    #[serde(default, rename = "device")]
    pub devices: Vec<DeviceEntry>,
}

impl DeviceSnapshot {
    pub fn parse(contents: &str) -> Result<Self> {
        let snapshot: Self =
            toml::from_str(contents).map_err(|e| AudioError::InvalidSnapshot(e.to_string()))?;

        if let Some(entry) = snapshot.devices.iter().find(|entry| entry.name.is_empty()) {
            return Err(AudioError::InvalidSnapshot(format!(
                "Device entry with empty name (in: {}, out: {})",
                entry.input_channels, entry.output_channels
            )));
        }

        Ok(snapshot)
    }

    pub fn from_devices(devices: &[SystemAudioDevice]) -> Self {
        Self {
            devices: devices.iter().map(DeviceEntry::from).collect(),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AudioError::InvalidSnapshot(e.to_string()))
    }

    pub fn into_devices(self) -> Vec<SystemAudioDevice> {
        self.devices.into_iter().map(SystemAudioDevice::from).collect()
    }
}

/// Read a device snapshot file
#[instrument]
pub async fn load_snapshot(path: &Path) -> Result<Vec<SystemAudioDevice>> {
    info!(path = %path.display(), "Loading device snapshot");

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AudioError::OsError(format!("{}: {}", path.display(), e)))?;
    let devices = DeviceSnapshot::parse(&contents)?.into_devices();

    debug!(count = devices.len(), "Device snapshot loaded");
    Ok(devices)
}

/// [`DeviceSource`] backed by a snapshot file, re-read on every call
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeviceSource for SnapshotSource {
    fn devices(&self) -> Result<Vec<SystemAudioDevice>> {
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| AudioError::OsError(format!("{}: {}", self.path.display(), e)))?;
        Ok(DeviceSnapshot::parse(&contents)?.into_devices())
    }
}
