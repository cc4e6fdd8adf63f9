//! Domain entities and business rules

pub mod audio;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod preferences;
pub mod selection;

pub use audio::{AudioError, Capability, DeviceSource, SystemAudioDevice};
pub use catalog::SystemAudioDevices;
pub use config::{AppConfig, ConfigError, ConfigManager, SoundIoConfig};
pub use contact::{Contact, Email, MatchedAddress, MatchedContact, Phone};
pub use preferences::{
    PreferenceSource, SoundPreferences, RINGTONE_OUTPUT_KEY, SOUND_INPUT_KEY, SOUND_OUTPUT_KEY,
};
pub use selection::{resolve, resolve_with_reason, Resolution, SelectedSoundIo, SoundRole};
