//! Immutable snapshot of the system's audio devices

use crate::domain::audio::{AudioError, Capability, Result, SystemAudioDevice};
use tracing::debug;

/// Ordered, write-once collection of audio devices
///
/// Construction guarantees that a built-in input device and a built-in
/// output device exist, so [`SystemAudioDevices::first_built_in`] never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemAudioDevices {
    devices: Vec<SystemAudioDevice>,
    built_in_input: usize,
    built_in_output: usize,
}

impl SystemAudioDevices {
    pub fn new(devices: Vec<SystemAudioDevice>) -> Result<Self> {
        let built_in_input = position_of_built_in(&devices, Capability::Input)?;
        let built_in_output = position_of_built_in(&devices, Capability::Output)?;

        debug!(
            count = devices.len(),
            built_in_input = %devices[built_in_input].name,
            built_in_output = %devices[built_in_output].name,
            "Device catalog created"
        );

        Ok(Self {
            devices,
            built_in_input,
            built_in_output,
        })
    }

    /// First device whose name matches exactly (case-sensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&SystemAudioDevice> {
        self.devices.iter().find(|device| device.name == name)
    }

    /// First built-in device exposing the given capability
    pub fn first_built_in(&self, capability: Capability) -> &SystemAudioDevice {
        match capability {
            Capability::Input => &self.devices[self.built_in_input],
            Capability::Output => &self.devices[self.built_in_output],
        }
    }

    pub fn input_devices(&self) -> impl Iterator<Item = &SystemAudioDevice> {
        self.devices.iter().filter(|device| device.has_input())
    }

    pub fn output_devices(&self) -> impl Iterator<Item = &SystemAudioDevice> {
        self.devices.iter().filter(|device| device.has_output())
    }

    pub fn all(&self) -> &[SystemAudioDevice] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

fn position_of_built_in(devices: &[SystemAudioDevice], capability: Capability) -> Result<usize> {
    devices
        .iter()
        .position(|device| device.is_built_in && capability.is_satisfied_by(device))
        .ok_or(AudioError::MissingBuiltInDevice(capability))
}
