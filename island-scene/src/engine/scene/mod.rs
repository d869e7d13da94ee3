//! Non-interactive scene content: lights, the static island models, the
//! invisible boundary volume and the orientation gizmo overlay.

/// Invisible volume framed when nothing is selected.
pub mod boundary;

/// Ambient fill and the shadow-casting sun.
pub mod lighting;

/// Axis cube overlay in the top-right corner of the window.
pub mod orientation_gizmo;

/// Sky, ocean and island models.
pub mod static_nodes;
