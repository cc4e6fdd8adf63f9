//! Built-in marking for hosts that only report default devices
//!
//! The catalog falls back to the *first* built-in device with a capability,
//! so the host defaults are flagged and moved to the front in an order that
//! makes the default input win the input lookup and the default output win
//! the output lookup. When both defaults are duplex and distinct no order
//! satisfies both; the default input then also serves as output fallback.

use soundio_core::domain::audio::SystemAudioDevice;
use tracing::debug;

/// Build devices from `(name, input_channels, output_channels)` in host order,
/// flagging and front-loading the host's default input and output
pub fn mark_host_defaults(
    devices: Vec<(String, u32, u32)>,
    default_input: Option<&str>,
    default_output: Option<&str>,
) -> Vec<SystemAudioDevice> {
    let input_at = devices
        .iter()
        .position(|(name, inputs, _)| *inputs > 0 && default_input == Some(name.as_str()));
    let output_at = devices
        .iter()
        .position(|(name, _, outputs)| *outputs > 0 && default_output == Some(name.as_str()));

    let mut slots: Vec<Option<SystemAudioDevice>> = devices
        .into_iter()
        .enumerate()
        .map(|(index, (name, inputs, outputs))| {
            let is_built_in = Some(index) == input_at || Some(index) == output_at;
            Some(SystemAudioDevice::new(name, inputs, outputs, is_built_in))
        })
        .collect();

    let leading: Vec<usize> = match (input_at, output_at) {
        (Some(input), Some(output)) if input == output => vec![input],
        // A duplex default input ahead of an output-only default output
        // would take over the output lookup.
        (Some(input), Some(output))
            if has_output(&slots[input]) && !has_input(&slots[output]) =>
        {
            vec![output, input]
        }
        (input, output) => input.into_iter().chain(output).collect(),
    };
    debug!(?input_at, ?output_at, ?leading, "Ordering host default devices");

    let mut ordered: Vec<SystemAudioDevice> =
        leading.iter().filter_map(|&index| slots[index].take()).collect();
    ordered.extend(slots.into_iter().flatten());
    ordered
}

fn has_input(slot: &Option<SystemAudioDevice>) -> bool {
    slot.as_ref().is_some_and(SystemAudioDevice::has_input)
}

fn has_output(slot: &Option<SystemAudioDevice>) -> bool {
    slot.as_ref().is_some_and(SystemAudioDevice::has_output)
}
