//! Compile-time settings shared by the island scene crates.

/// Asset locations for the scene models.
pub mod path;

/// Fixed animal roster and scatter range for item placement.
pub mod placement;

/// Lighting, camera, widget and colour settings.
pub mod render_settings;

/// Axis permutation applied to placement records.
pub mod coordinate_system;
