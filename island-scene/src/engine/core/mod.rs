//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and scene configuration for both native and WASM targets.

/// Application setup: plugins, resources, startup spawning and system ordering.
pub mod app_setup;

/// Application state machine, from model loading to the running scene.
pub mod app_state;

/// Runtime scene configuration with defaults from the `constants` crate.
pub mod config;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
