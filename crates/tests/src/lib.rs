//! Cross-crate integration tests for Soundio

#[cfg(test)]
mod selection_integration;
