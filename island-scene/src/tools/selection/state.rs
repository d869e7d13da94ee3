use bevy::prelude::*;
use constants::render_settings::{ITEM_COLOUR, ITEM_HOVER_COLOUR};

/// The single currently selected item, if any.
///
/// Written only by `apply_item_pointer_events`; every item derives its own
/// `selected` flag from it by identity.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionStore {
    selected: Option<Entity>,
}

impl SelectionStore {
    pub fn get_selected(&self) -> Option<Entity> {
        self.selected
    }

    pub fn set_selected(&mut self, entity: Entity) {
        self.selected = Some(entity);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self, entity: Entity) -> bool {
        self.selected == Some(entity)
    }
}

/// One placed animal. Lives on the model entity; `pivot` is the parent the
/// transform widget moves.
#[derive(Component, Debug, Clone)]
pub struct Item {
    pub index: usize,
    pub name: String,
    pub pivot: Entity,
    /// Placement yaw in radians, as generated (not wrapped to (-π, π]).
    pub heading: f32,
}

/// Parent of an item's model and widget, carrying the placement translation.
#[derive(Component, Debug, Clone, Copy)]
pub struct ItemPivot;

/// Per-item interaction flags.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ItemState {
    pub hovered: bool,
    pub selected: bool,
}

impl ItemState {
    /// Hover highlight, suppressed while selected.
    pub fn highlighted(&self) -> bool {
        self.hovered && !self.selected
    }

    pub fn colour(&self) -> Color {
        if self.highlighted() {
            ITEM_HOVER_COLOUR
        } else {
            ITEM_COLOUR
        }
    }
}

/// Item currently under the pointer.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoveredItem(pub Option<Entity>);

/// Button and position of the press that may become a click.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PointerPress {
    pub start: Option<(MouseButton, Vec2)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_only_when_hovered_and_unselected() {
        for hovered in [false, true] {
            for selected in [false, true] {
                let state = ItemState { hovered, selected };
                assert_eq!(state.highlighted(), hovered && !selected);
                if selected {
                    assert_eq!(state.colour(), ITEM_COLOUR);
                }
            }
        }
        assert_eq!(
            ItemState {
                hovered: true,
                selected: false
            }
            .colour(),
            ITEM_HOVER_COLOUR
        );
    }

    #[test]
    fn store_holds_one_entity() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let mut store = SelectionStore::default();
        assert_eq!(store.get_selected(), None);

        store.set_selected(a);
        store.set_selected(b);
        assert!(!store.is_selected(a));
        assert!(store.is_selected(b));

        store.clear();
        assert_eq!(store.get_selected(), None);
    }
}
