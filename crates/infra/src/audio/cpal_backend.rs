//! CPAL-based device enumeration
//!
//! CPAL has no notion of a "built-in" device, so the host's default input
//! and default output devices play that role (see [`mark_host_defaults`]).

use crate::audio::defaults::mark_host_defaults;
use cpal::traits::{DeviceTrait, HostTrait};
use soundio_core::domain::audio::{AudioError, DeviceSource, Result, SystemAudioDevice};
use tracing::{debug, info, warn};

/// CPAL-based audio enumerator
pub struct CpalEnumerator {
    host: cpal::Host,
}

impl Default for CpalEnumerator {
    fn default() -> Self {
        info!("Initializing CPAL enumerator");
        Self::new()
    }
}

impl CpalEnumerator {
    pub fn new() -> Self {
        let host = cpal::default_host();
        debug!("Using audio host: {:?}", host.id());
        Self { host }
    }

    #[allow(deprecated)]
    fn device_name(device: &cpal::Device) -> Option<String> {
        device.name().ok()
    }

    /// Widest channel layout among the supported input configurations
    fn max_input_channels(device: &cpal::Device) -> u32 {
        device
            .supported_input_configs()
            .map(|configs| configs.map(|c| u32::from(c.channels())).max().unwrap_or(0))
            .unwrap_or(0)
    }

    fn max_output_channels(device: &cpal::Device) -> u32 {
        device
            .supported_output_configs()
            .map(|configs| configs.map(|c| u32::from(c.channels())).max().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl DeviceSource for CpalEnumerator {
    fn devices(&self) -> Result<Vec<SystemAudioDevice>> {
        info!("Enumerating all audio devices");

        let default_input = self
            .host
            .default_input_device()
            .as_ref()
            .and_then(Self::device_name);
        let default_output = self
            .host
            .default_output_device()
            .as_ref()
            .and_then(Self::device_name);

        let cpal_devices = self
            .host
            .devices()
            .map_err(|e| AudioError::OsError(e.to_string()))?;

        let mut found = Vec::new();
        for device in cpal_devices {
            let Some(name) = Self::device_name(&device) else {
                warn!("Skipping device without a name");
                continue;
            };

            let inputs = Self::max_input_channels(&device);
            let outputs = Self::max_output_channels(&device);
            if inputs == 0 && outputs == 0 {
                debug!(device = %name, "Skipping device with no channels");
                continue;
            }

            debug!(device = %name, inputs, outputs, "Found device");
            found.push((name, inputs, outputs));
        }

        let devices =
            mark_host_defaults(found, default_input.as_deref(), default_output.as_deref());

        info!("Found {} audio devices", devices.len());
        Ok(devices)
    }
}
