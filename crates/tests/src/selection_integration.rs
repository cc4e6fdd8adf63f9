//! Integration tests for device selection
//!
//! These tests go from a device snapshot file and a config file on disk to
//! the selected sound I/O, the way the application does at startup.

use proptest::prelude::*;
use soundio_core::domain::audio::{AudioError, Capability, DeviceSource, SystemAudioDevice};
use soundio_core::domain::catalog::SystemAudioDevices;
use soundio_core::domain::config::{ConfigManager, SoundIoConfig};
use soundio_core::domain::selection::{SelectedSoundIo, SoundRole};
use soundio_infra::audio::{load_snapshot, DeviceSnapshot, SnapshotSource};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DESKTOP: &str = r#"
[[device]]
name = "BuiltIn-Mic"
input_channels = 1
built_in = true

[[device]]
name = "BuiltIn-Speakers"
output_channels = 2
built_in = true

[[device]]
name = "USB-Headset"
input_channels = 1
output_channels = 2
"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

async fn select(snapshot: &Path, manager: &ConfigManager) -> Result<SelectedSoundIo, AudioError> {
    let config = manager.load().await.unwrap();
    let devices = load_snapshot(snapshot).await?;
    SelectedSoundIo::from_devices(devices, &config)
}

// ============================================================================
// SNAPSHOT + CONFIG ON DISK
// ============================================================================

#[tokio::test]
async fn test_fresh_install_selects_built_in_devices() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_file(dir.path(), "devices.toml", DESKTOP);
    let manager = ConfigManager::new(dir.path().join("config"));

    let io = select(&snapshot, &manager).await.unwrap();

    assert_eq!(io.sound_input().name, "BuiltIn-Mic");
    assert_eq!(io.sound_output().name, "BuiltIn-Speakers");
    assert_eq!(io.ringtone_output().name, "BuiltIn-Speakers");
}

#[tokio::test]
async fn test_saved_preferences_survive_restart() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_file(dir.path(), "devices.toml", DESKTOP);
    let manager = ConfigManager::new(dir.path().join("config"));

    let mut config = SoundIoConfig::default();
    config.prefer(SoundRole::SoundInput, "USB-Headset").unwrap();
    config.prefer(SoundRole::SoundOutput, "Nonexistent").unwrap();
    config.prefer(SoundRole::RingtoneOutput, "BuiltIn-Mic").unwrap();
    manager.save(&config).await.unwrap();

    let io = select(&snapshot, &manager).await.unwrap();

    assert_eq!(io.sound_input(), &SystemAudioDevice::new("USB-Headset", 1, 2, false));
    assert_eq!(io.sound_output().name, "BuiltIn-Speakers");
    assert_eq!(io.ringtone_output().name, "BuiltIn-Speakers");
}

#[tokio::test]
async fn test_unplugged_device_falls_back() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(dir.path().join("config"));

    let mut config = SoundIoConfig::default();
    config.prefer(SoundRole::SoundOutput, "USB-Headset").unwrap();
    manager.save(&config).await.unwrap();

    let before = write_file(dir.path(), "before.toml", DESKTOP);
    let io = select(&before, &manager).await.unwrap();
    assert_eq!(io.sound_output().name, "USB-Headset");

    // Headset unplugged: a new snapshot means a new selection.
    let without_headset = DESKTOP.split("[[device]]\nname = \"USB-Headset\"").next().unwrap();
    let after = write_file(dir.path(), "after.toml", without_headset);
    let io = select(&after, &manager).await.unwrap();
    assert_eq!(io.sound_output().name, "BuiltIn-Speakers");
}

#[tokio::test]
async fn test_headset_losing_microphone_falls_back() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(dir.path().join("config"));

    let mut config = SoundIoConfig::default();
    config.prefer(SoundRole::SoundInput, "USB-Headset").unwrap();
    manager.save(&config).await.unwrap();

    let output_only =
        DESKTOP.replace("input_channels = 1\noutput_channels = 2", "output_channels = 2");
    let snapshot = write_file(dir.path(), "devices.toml", &output_only);
    let io = select(&snapshot, &manager).await.unwrap();

    assert_eq!(io.sound_input().name, "BuiltIn-Mic");
}

#[tokio::test]
async fn test_missing_built_in_output_blocks_startup() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(dir.path().join("config"));
    let snapshot = write_file(
        dir.path(),
        "devices.toml",
        "[[device]]\nname = \"BuiltIn-Mic\"\ninput_channels = 1\nbuilt_in = true\n\n\
         [[device]]\nname = \"USB-Headset\"\ninput_channels = 1\noutput_channels = 2\n",
    );

    let err = select(&snapshot, &manager).await.unwrap_err();
    assert!(matches!(err, AudioError::MissingBuiltInDevice(Capability::Output)));
}

#[tokio::test]
async fn test_corrupt_config_still_selects() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_file(dir.path(), "devices.toml", DESKTOP);
    write_file(dir.path(), "config.toml", "preferences = oops");
    let manager = ConfigManager::new(dir.path().to_path_buf());

    let io = select(&snapshot, &manager).await.unwrap();

    assert_eq!(io.sound_input().name, "BuiltIn-Mic");
    assert!(dir.path().join("config.toml.corrupt").exists());
}

#[test]
fn test_snapshot_source_matches_catalog_order() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "devices.toml", DESKTOP);

    let devices = SnapshotSource::new(path).devices().unwrap();
    let catalog = SystemAudioDevices::new(devices.clone()).unwrap();

    assert_eq!(catalog.all(), devices.as_slice());
    assert_eq!(DeviceSnapshot::from_devices(catalog.all()).into_devices(), devices);
}

// ============================================================================
// SELECTION LAWS
// ============================================================================

fn arb_devices() -> impl Strategy<Value = Vec<SystemAudioDevice>> {
    prop::collection::vec(
        ("[a-c]{1,2}", 0u32..3, 0u32..3, any::<bool>()).prop_map(
            |(name, inputs, outputs, built_in)| {
                SystemAudioDevice::new(name, inputs, outputs, built_in)
            },
        ),
        0..10,
    )
}

proptest! {
    #[test]
    fn prop_construction_succeeds_iff_built_ins_exist(devices in arb_devices()) {
        let has_input = devices.iter().any(|d| d.is_built_in && d.has_input());
        let has_output = devices.iter().any(|d| d.is_built_in && d.has_output());

        let result = SelectedSoundIo::from_devices(devices, &SoundIoConfig::default());
        prop_assert_eq!(result.is_ok(), has_input && has_output);
    }

    #[test]
    fn prop_every_role_gets_a_capable_device(devices in arb_devices(), name in "[a-c]{1,2}") {
        let mut config = SoundIoConfig::default();
        for role in SoundRole::ALL {
            config.prefer(role, &name).unwrap();
        }

        if let Ok(io) = SelectedSoundIo::from_devices(devices.clone(), &config) {
            for role in SoundRole::ALL {
                let device = io.device_for(role);
                prop_assert!(role.required_capability().is_satisfied_by(device));
                prop_assert!(devices.contains(device));
            }
        }
    }
}
