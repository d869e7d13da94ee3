//! Item picking and the shared selection store.
//!
//! Pointer input is raycast against item bounds into `ItemPointerEvent`s.
//! A single system applies them to the store and item flags.

pub mod interactions;

/// Ray/box intersection used for picking and occlusion.
pub mod ray;

pub mod state;

use bevy::prelude::*;

use interactions::ItemPointerEvent;
use state::{HoveredItem, PointerPress, SelectionStore};

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectionStore>()
            .init_resource::<HoveredItem>()
            .init_resource::<PointerPress>()
            .add_event::<ItemPointerEvent>();
    }
}
