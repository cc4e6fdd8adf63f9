//! Device sources
//!
//! - `snapshot`: device lists recorded in TOML files
//! - `defaults`: built-in marking from a host's default devices
//! - `cpal_backend`: live enumeration through CPAL, which abstracts
//!   platform-specific APIs (WASAPI, ALSA/PulseAudio, CoreAudio).
//!   Only built with the `cpal-backend` feature.

#[cfg(feature = "cpal-backend")]
pub mod cpal_backend;
pub mod defaults;
pub mod snapshot;

#[cfg(feature = "cpal-backend")]
pub use cpal_backend::*;
pub use defaults::*;
pub use snapshot::*;
