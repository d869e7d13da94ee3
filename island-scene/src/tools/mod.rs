//! Interactive layer on top of the scene: items, picking and selection,
//! the transform widget and item annotations.

/// Screen-space item labels with occlusion against other items.
pub mod annotation;

/// Item spawning and the per-frame camera follow tick.
pub mod items;

/// Pointer picking and the single-selection store.
pub mod selection;

/// Translate-only widget for moving the selected item.
pub mod transform_widget;
