use anyhow::Context;
use serde::Serialize;
use soundio_core::domain::audio::SystemAudioDevice;
use soundio_core::domain::catalog::SystemAudioDevices;
use soundio_core::domain::config::{ConfigManager, SoundIoConfig};
use soundio_core::domain::selection::{resolve_with_reason, Resolution, SoundRole};
use soundio_infra::audio::load_snapshot;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

pub fn config_manager(path: Option<PathBuf>) -> anyhow::Result<ConfigManager> {
    match path {
        Some(path) => Ok(ConfigManager::at_path(path)),
        None => Ok(ConfigManager::new(ConfigManager::default_config_dir()?)),
    }
}

/// Devices from, in order: the explicit snapshot, the configured snapshot,
/// the live backend.
async fn load_devices(
    config: &SoundIoConfig,
    snapshot: Option<PathBuf>,
) -> anyhow::Result<Vec<SystemAudioDevice>> {
    if let Some(path) = snapshot.or_else(|| config.app.device_snapshot.clone()) {
        return load_snapshot(&path)
            .await
            .with_context(|| format!("Failed to load device snapshot {}", path.display()));
    }

    live_devices()
}

#[cfg(feature = "cpal-backend")]
fn live_devices() -> anyhow::Result<Vec<SystemAudioDevice>> {
    use soundio_core::domain::audio::DeviceSource;

    let enumerator = soundio_infra::audio::CpalEnumerator::default();
    Ok(enumerator.devices()?)
}

#[cfg(not(feature = "cpal-backend"))]
fn live_devices() -> anyhow::Result<Vec<SystemAudioDevice>> {
    anyhow::bail!(
        "No device snapshot given and live enumeration is not compiled in (enable `cpal-backend`)"
    )
}

pub async fn devices(
    manager: &ConfigManager,
    snapshot: Option<PathBuf>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let config = manager.load().await?;
    let devices = load_devices(&config, snapshot).await?;
    write_devices(&devices, json, out)
}

fn write_devices(
    devices: &[SystemAudioDevice],
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, devices)?;
        writeln!(out)?;
        return Ok(());
    }

    for device in devices {
        writeln!(out, "{device}")?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct RoleSelection<'a> {
    role: SoundRole,
    device: SystemAudioDevice,
    fallback: bool,
    preferred: Option<&'a str>,
}

pub async fn resolve(
    manager: &ConfigManager,
    snapshot: Option<PathBuf>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let config = manager.load().await?;
    let devices = load_devices(&config, snapshot).await?;
    let catalog = SystemAudioDevices::new(devices).context("Audio devices cannot be initialized")?;
    write_selection(&catalog, &config, json, out)
}

fn write_selection(
    catalog: &SystemAudioDevices,
    config: &SoundIoConfig,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let selections: Vec<RoleSelection<'_>> = SoundRole::ALL
        .into_iter()
        .map(|role| {
            let (device, resolution) = resolve_with_reason(catalog, config, role);
            if matches!(resolution, Resolution::NotFound | Resolution::MissingCapability) {
                warn!(role = %role, reason = ?resolution, "Saved device is unusable");
            }
            RoleSelection {
                role,
                device,
                fallback: resolution.is_fallback(),
                preferred: config.preferred_device(role),
            }
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &selections)?;
        writeln!(out)?;
        return Ok(());
    }

    for selection in &selections {
        let note = if selection.fallback { " [built-in fallback]" } else { "" };
        writeln!(out, "{:<16} {}{}", selection.role, selection.device.name, note)?;
    }
    Ok(())
}

pub async fn prefer(manager: &ConfigManager, role: SoundRole, name: &str) -> anyhow::Result<()> {
    let mut config = manager.load().await?;
    config.prefer(role, name)?;
    manager.save(&config).await?;

    info!(role = %role, device = name, "Preference saved");
    Ok(())
}

pub async fn forget(manager: &ConfigManager, role: SoundRole) -> anyhow::Result<()> {
    let mut config = manager.load().await?;
    config.forget(role);
    manager.save(&config).await?;

    info!(role = %role, "Preference removed");
    Ok(())
}
