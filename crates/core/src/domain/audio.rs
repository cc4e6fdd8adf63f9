//! Audio device domain models
//!
//! A [`SystemAudioDevice`] is a plain value describing one endpoint reported
//! by the operating system. Platform enumeration (CoreAudio, WASAPI, ALSA)
//! lives in the `infra` crate; everything here is pure data.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur in the audio subsystem
#[derive(Debug, Error)]
pub enum AudioError {
    /// The snapshot has no built-in device able to act as the last-resort fallback
    #[error("No built-in {0} device available")]
    MissingBuiltInDevice(Capability),

    /// A device snapshot could not be read or parsed
    #[error("Invalid device snapshot: {0}")]
    InvalidSnapshot(String),

    /// Input/Output error at the OS level
    #[error("OS error: {0}")]
    OsError(String),
}

pub type Result<T> = std::result::Result<T, AudioError>;

/// Channel direction a device must expose to serve a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Input,
    Output,
}

impl Capability {
    pub fn is_satisfied_by(&self, device: &SystemAudioDevice) -> bool {
        match self {
            Capability::Input => device.has_input(),
            Capability::Output => device.has_output(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Input => f.write_str("input"),
            Capability::Output => f.write_str("output"),
        }
    }
}

/// One audio endpoint as reported by the system
///
/// Equality covers every attribute: two devices sharing a name but exposing
/// different channel counts are distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemAudioDevice {
    pub name: String,
    pub input_channel_count: u32,
    pub output_channel_count: u32,
    pub is_built_in: bool,
}

impl SystemAudioDevice {
    pub fn new(
        name: impl Into<String>,
        input_channel_count: u32,
        output_channel_count: u32,
        is_built_in: bool,
    ) -> Self {
        Self {
            name: name.into(),
            input_channel_count,
            output_channel_count,
            is_built_in,
        }
    }

    pub fn has_input(&self) -> bool {
        self.input_channel_count > 0
    }

    pub fn has_output(&self) -> bool {
        self.output_channel_count > 0
    }
}

impl fmt::Display for SystemAudioDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (in: {}, out: {}{})",
            self.name,
            self.input_channel_count,
            self.output_channel_count,
            if self.is_built_in { ", built-in" } else { "" }
        )
    }
}

/// Trait for producing the current list of system audio devices
///
/// Implementations live in the `infra` crate. The returned order is the
/// order the platform reported and is preserved by the catalog.
pub trait DeviceSource: Send + Sync {
    fn devices(&self) -> Result<Vec<SystemAudioDevice>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_predicates() {
        let mic = SystemAudioDevice::new("Mic", 1, 0, true);
        assert!(mic.has_input());
        assert!(!mic.has_output());

        let silent = SystemAudioDevice::new("Dummy", 0, 0, false);
        assert!(!silent.has_input());
        assert!(!silent.has_output());
    }

    #[test]
    fn test_equality_covers_capabilities() {
        let a = SystemAudioDevice::new("Headset", 1, 2, false);
        let b = SystemAudioDevice::new("Headset", 0, 2, false);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_capability_check() {
        let speakers = SystemAudioDevice::new("Speakers", 0, 2, true);
        assert!(Capability::Output.is_satisfied_by(&speakers));
        assert!(!Capability::Input.is_satisfied_by(&speakers));
    }

    #[test]
    fn test_missing_built_in_message() {
        let err = AudioError::MissingBuiltInDevice(Capability::Output);
        assert_eq!(err.to_string(), "No built-in output device available");
    }
}
