//! Device selection for call audio
//!
//! Every role goes through the same policy:
//!
//! 1. read the saved device name for the role,
//! 2. look it up in the catalog by exact name,
//! 3. accept it if it exposes the channel direction the role needs,
//! 4. otherwise use the first built-in device with that direction.
//!
//! Stale preferences are expected (devices get unplugged or renamed), so
//! every miss degrades to the built-in device instead of failing.

use crate::domain::audio::{Capability, Result, SystemAudioDevice};
use crate::domain::catalog::SystemAudioDevices;
use crate::domain::preferences::{
    PreferenceSource, RINGTONE_OUTPUT_KEY, SOUND_INPUT_KEY, SOUND_OUTPUT_KEY,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Purpose a device is selected for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundRole {
    SoundInput,
    SoundOutput,
    RingtoneOutput,
}

impl SoundRole {
    pub const ALL: [SoundRole; 3] = [
        SoundRole::SoundInput,
        SoundRole::SoundOutput,
        SoundRole::RingtoneOutput,
    ];

    pub fn preference_key(&self) -> &'static str {
        match self {
            SoundRole::SoundInput => SOUND_INPUT_KEY,
            SoundRole::SoundOutput => SOUND_OUTPUT_KEY,
            SoundRole::RingtoneOutput => RINGTONE_OUTPUT_KEY,
        }
    }

    pub fn required_capability(&self) -> Capability {
        match self {
            SoundRole::SoundInput => Capability::Input,
            SoundRole::SoundOutput | SoundRole::RingtoneOutput => Capability::Output,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundRole::SoundInput => "sound-input",
            SoundRole::SoundOutput => "sound-output",
            SoundRole::RingtoneOutput => "ringtone-output",
        }
    }
}

impl fmt::Display for SoundRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SoundRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SoundRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s || role.preference_key() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown role '{s}' (expected sound-input, sound-output or ringtone-output)"
                )
            })
    }
}

/// How a role ended up with its device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The saved device exists and has the needed channels
    Preferred,
    /// Nothing saved for the role
    NoPreference,
    /// The saved name matches no device in the snapshot
    NotFound,
    /// The saved device exists but lacks the needed channel direction
    MissingCapability,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Resolution::Preferred)
    }
}

/// Resolve one role and report which branch of the policy was taken
pub fn resolve_with_reason(
    catalog: &SystemAudioDevices,
    preferences: &impl PreferenceSource,
    role: SoundRole,
) -> (SystemAudioDevice, Resolution) {
    let capability = role.required_capability();

    // An empty saved name never names a device.
    let saved = preferences
        .get(role.preference_key())
        .filter(|name| !name.is_empty());

    let resolution = match saved {
        None => Resolution::NoPreference,
        Some(name) => match catalog.find_by_name(&name) {
            None => Resolution::NotFound,
            Some(device) if capability.is_satisfied_by(device) => {
                return (device.clone(), Resolution::Preferred);
            }
            Some(_) => Resolution::MissingCapability,
        },
    };

    let fallback = catalog.first_built_in(capability);
    debug!(
        role = %role,
        reason = ?resolution,
        device = %fallback.name,
        "Falling back to built-in device"
    );
    (fallback.clone(), resolution)
}

/// Resolve the device for one role
pub fn resolve(
    catalog: &SystemAudioDevices,
    preferences: &impl PreferenceSource,
    role: SoundRole,
) -> SystemAudioDevice {
    resolve_with_reason(catalog, preferences, role).0
}

/// Devices chosen for all three roles, resolved once at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedSoundIo {
    sound_input: SystemAudioDevice,
    sound_output: SystemAudioDevice,
    ringtone_output: SystemAudioDevice,
}

impl SelectedSoundIo {
    /// Resolve all three roles against an already validated catalog
    ///
    /// The catalog guarantees both built-in fallbacks, so this cannot fail;
    /// [`SelectedSoundIo::from_devices`] is the fallible entry point.
    #[instrument(skip_all, fields(devices = catalog.len()))]
    pub fn new(catalog: &SystemAudioDevices, preferences: &impl PreferenceSource) -> Self {
        let selected = Self {
            sound_input: resolve(catalog, preferences, SoundRole::SoundInput),
            sound_output: resolve(catalog, preferences, SoundRole::SoundOutput),
            ringtone_output: resolve(catalog, preferences, SoundRole::RingtoneOutput),
        };

        debug!(
            sound_input = %selected.sound_input.name,
            sound_output = %selected.sound_output.name,
            ringtone_output = %selected.ringtone_output.name,
            "Sound I/O selected"
        );
        selected
    }

    /// Build the catalog from a raw device list and select from it
    pub fn from_devices(
        devices: Vec<SystemAudioDevice>,
        preferences: &impl PreferenceSource,
    ) -> Result<Self> {
        let catalog = SystemAudioDevices::new(devices)?;
        Ok(Self::new(&catalog, preferences))
    }

    pub fn sound_input(&self) -> &SystemAudioDevice {
        &self.sound_input
    }

    pub fn sound_output(&self) -> &SystemAudioDevice {
        &self.sound_output
    }

    pub fn ringtone_output(&self) -> &SystemAudioDevice {
        &self.ringtone_output
    }

    pub fn device_for(&self, role: SoundRole) -> &SystemAudioDevice {
        match role {
            SoundRole::SoundInput => &self.sound_input,
            SoundRole::SoundOutput => &self.sound_output,
            SoundRole::RingtoneOutput => &self.ringtone_output,
        }
    }
}
