//! Saved device preferences
//!
//! Preferences are looked up by role key and hold the device *name* that was
//! chosen last time. The selector only ever reads them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const SOUND_INPUT_KEY: &str = "SoundInput";
pub const SOUND_OUTPUT_KEY: &str = "SoundOutput";
pub const RINGTONE_OUTPUT_KEY: &str = "RingtoneOutput";

/// Read-only key/value store of saved device names
pub trait PreferenceSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: PreferenceSource + ?Sized> PreferenceSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl PreferenceSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl PreferenceSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Per-role device names as persisted in the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundPreferences {
    /// Sound input device name (None = use built-in)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_input: Option<String>,

    /// Sound output device name (None = use built-in)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_output: Option<String>,

    /// Ringtone output device name (None = use built-in)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ringtone_output: Option<String>,
}

impl SoundPreferences {
    fn slot(&self, key: &str) -> Option<&Option<String>> {
        match key {
            SOUND_INPUT_KEY => Some(&self.sound_input),
            SOUND_OUTPUT_KEY => Some(&self.sound_output),
            RINGTONE_OUTPUT_KEY => Some(&self.ringtone_output),
            _ => None,
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            SOUND_INPUT_KEY => Some(&mut self.sound_input),
            SOUND_OUTPUT_KEY => Some(&mut self.sound_output),
            RINGTONE_OUTPUT_KEY => Some(&mut self.ringtone_output),
            _ => None,
        }
    }

    /// Saved name for a role key
    pub fn name(&self, key: &str) -> Option<&str> {
        self.slot(key)?.as_deref()
    }

    /// Store a device name for a role key. Returns false for unknown keys.
    pub fn set(&mut self, key: &str, device_name: impl Into<String>) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = Some(device_name.into());
                true
            }
            None => false,
        }
    }

    /// Forget the device name for a role key. Returns false for unknown keys.
    pub fn clear(&mut self, key: &str) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }
}

impl PreferenceSource for SoundPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.name(key).map(str::to_string)
    }
}
