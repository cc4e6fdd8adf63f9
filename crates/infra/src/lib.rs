//! Soundio infrastructure: concrete sources of system audio devices

pub mod audio;
