//! Soundio core
//!
//! Platform-agnostic selection of the audio devices used for calls: which
//! device captures the microphone, which one plays the call audio and which
//! one rings. Device enumeration lives in `soundio-infra`.

pub mod domain;
