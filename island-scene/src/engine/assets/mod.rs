//! Scene asset descriptions: placement records, model sources and bounds.
//!
//! Sources only request their glTF; resolving it into a mesh lives in
//! `engine::loading`.

/// Local and world-space bounding boxes used for raycasting and camera fitting.
pub mod bounds;

/// Model source component, load state machine and per-node fault taxonomy.
pub mod model_source;

/// Placement records for the animals scattered over the island.
pub mod placement;
