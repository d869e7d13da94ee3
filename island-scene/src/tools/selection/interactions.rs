use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;
use constants::render_settings::CLICK_DRAG_TOLERANCE;

use super::ray::pick_nearest;
use super::state::*;
use crate::engine::assets::bounds::ModelBounds;
use crate::engine::camera::SceneCamera;
use crate::engine::camera::bounds_fit::FitRequest;
use crate::tools::transform_widget::drag::WidgetDrag;

/// Pointer events routed to items after raycasting.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPointerEvent {
    Enter(Entity),
    Leave(Entity),
    Click(Entity),
    /// Click that hit no item.
    Miss(MouseButton),
}

const TRACKED_BUTTONS: [MouseButton; 3] =
    [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

// Raycast the cursor against item bounds and turn raw mouse input into item events
pub fn detect_item_pointer_events(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<SceneCamera>>,
    items: Query<(Entity, &GlobalTransform, &ModelBounds), With<Item>>,
    widget_drag: Res<WidgetDrag>,
    mut press: ResMut<PointerPress>,
    mut hovered: ResMut<HoveredItem>,
    mut events: EventWriter<ItemPointerEvent>,
) {
    let Ok(window) = windows.single() else { return };
    let cursor = window.cursor_position();

    let hit = cursor.and_then(|cursor_pos| {
        let (cam_xf, camera) = cameras.single().ok()?;
        let ray = camera.viewport_to_world(cam_xf, cursor_pos).ok()?;
        pick_nearest(ray, &items).map(|(entity, _)| entity)
    });

    if hovered.0 != hit {
        if let Some(previous) = hovered.0 {
            events.write(ItemPointerEvent::Leave(previous));
        }
        if let Some(current) = hit {
            events.write(ItemPointerEvent::Enter(current));
        }
        hovered.0 = hit;
    }

    let Some(cursor_pos) = cursor else {
        press.start = None;
        return;
    };

    for button in TRACKED_BUTTONS {
        if buttons.just_pressed(button) {
            // Presses that grab the transform widget never become clicks.
            press.start = if widget_drag.is_active() {
                None
            } else {
                Some((button, cursor_pos))
            };
        }

        if buttons.just_released(button) {
            let Some((pressed, start)) = press.start else {
                continue;
            };
            if pressed != button {
                continue;
            }
            press.start = None;
            if start.distance(cursor_pos) > CLICK_DRAG_TOLERANCE {
                continue;
            }
            match (hit, button) {
                (Some(entity), MouseButton::Left) => {
                    events.write(ItemPointerEvent::Click(entity));
                }
                (Some(_), _) => {}
                (None, button) => {
                    events.write(ItemPointerEvent::Miss(button));
                }
            }
        }
    }
}

// Single writer of the selection store
pub fn apply_item_pointer_events(
    mut events: EventReader<ItemPointerEvent>,
    mut store: ResMut<SelectionStore>,
    mut states: Query<&mut ItemState>,
    items: Query<&Item>,
    mut fit: EventWriter<FitRequest>,
) {
    for event in events.read() {
        match *event {
            ItemPointerEvent::Enter(entity) => {
                if let Ok(mut state) = states.get_mut(entity) {
                    state.hovered = true;
                }
            }
            ItemPointerEvent::Leave(entity) => {
                if let Ok(mut state) = states.get_mut(entity) {
                    state.hovered = false;
                }
            }
            ItemPointerEvent::Click(entity) => {
                store.set_selected(entity);
                fit.write(FitRequest::Object(entity));
                if let Ok(item) = items.get(entity) {
                    info!("Selected item {} ({})", item.index, item.name);
                }
            }
            ItemPointerEvent::Miss(MouseButton::Left) => {
                store.clear();
                fit.write(FitRequest::Boundary);
            }
            ItemPointerEvent::Miss(_) => {}
        }
    }
}

/// Re-derive every item's `selected` flag whenever the store changes.
pub fn sync_selected_flags(store: Res<SelectionStore>, mut states: Query<(Entity, &mut ItemState)>) {
    if !store.is_changed() {
        return;
    }
    for (entity, mut state) in &mut states {
        let selected = store.is_selected(entity);
        if state.selected != selected {
            state.selected = selected;
        }
    }
}

/// Recolour items whose hover/selection changed.
pub fn apply_item_highlight(
    items: Query<
        (&ItemState, &MeshMaterial3d<StandardMaterial>),
        Or<(Changed<ItemState>, Added<MeshMaterial3d<StandardMaterial>>)>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (state, material) in &items {
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = state.colour();
        }
    }
}

/// Pointer cursor while any item is hovered.
pub fn update_hover_cursor(
    hovered: Res<HoveredItem>,
    windows: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
) {
    if !hovered.is_changed() {
        return;
    }
    let Ok(window) = windows.single() else { return };
    let icon = if hovered.0.is_some() {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    };
    commands.entity(window).insert(CursorIcon::from(icon));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        app: App,
        items: Vec<Entity>,
        fits: bevy::ecs::event::EventCursor<FitRequest>,
    }

    impl Harness {
        fn new(count: usize) -> Self {
            let mut app = App::new();
            app.add_event::<ItemPointerEvent>()
                .add_event::<FitRequest>()
                .init_resource::<SelectionStore>()
                .add_systems(
                    Update,
                    (apply_item_pointer_events, sync_selected_flags).chain(),
                );

            let items = (0..count)
                .map(|index| {
                    app.world_mut()
                        .spawn((
                            Item {
                                index,
                                name: format!("item-{index}"),
                                pivot: Entity::PLACEHOLDER,
                                heading: 0.0,
                            },
                            ItemState::default(),
                        ))
                        .id()
                })
                .collect();
            app.update();

            let fits = app.world().resource::<Events<FitRequest>>().get_cursor();
            Self { app, items, fits }
        }

        fn send(&mut self, event: ItemPointerEvent) -> Vec<FitRequest> {
            self.app.world_mut().send_event(event);
            self.app.update();
            let events = self.app.world().resource::<Events<FitRequest>>();
            self.fits.read(events).copied().collect()
        }

        fn state(&self, index: usize) -> ItemState {
            *self.app.world().get::<ItemState>(self.items[index]).unwrap()
        }

        fn selected(&self) -> Option<Entity> {
            self.app.world().resource::<SelectionStore>().get_selected()
        }

        fn selected_count(&self) -> usize {
            (0..self.items.len()).filter(|i| self.state(*i).selected).count()
        }
    }

    #[test]
    fn last_click_wins() {
        let mut h = Harness::new(2);
        let (a, b) = (h.items[0], h.items[1]);

        assert_eq!(h.send(ItemPointerEvent::Click(a)), vec![FitRequest::Object(a)]);
        assert!(h.state(0).selected);

        assert_eq!(h.send(ItemPointerEvent::Click(b)), vec![FitRequest::Object(b)]);
        assert!(!h.state(0).selected);
        assert!(h.state(1).selected);
        assert_eq!(h.selected(), Some(b));
    }

    #[test]
    fn at_most_one_selected_across_click_sequence() {
        let mut h = Harness::new(5);
        for index in [0, 3, 3, 1, 4, 0, 2] {
            let item = h.items[index];
            h.send(ItemPointerEvent::Click(item));
            assert_eq!(h.selected_count(), 1);
            assert!(h.state(index).selected);
        }
    }

    #[test]
    fn clicking_selected_item_refits_without_toggling() {
        let mut h = Harness::new(1);
        let a = h.items[0];
        h.send(ItemPointerEvent::Click(a));

        assert_eq!(h.send(ItemPointerEvent::Click(a)), vec![FitRequest::Object(a)]);
        assert!(h.state(0).selected);
    }

    #[test]
    fn primary_miss_clears_and_fits_boundary_once() {
        let mut h = Harness::new(8);
        let third = h.items[3];
        h.send(ItemPointerEvent::Click(third));
        assert_eq!(h.selected(), Some(third));

        let fits = h.send(ItemPointerEvent::Miss(MouseButton::Left));
        assert_eq!(fits, vec![FitRequest::Boundary]);
        assert_eq!(h.selected(), None);
        assert_eq!(h.selected_count(), 0);
    }

    #[test]
    fn secondary_miss_keeps_selection() {
        let mut h = Harness::new(2);
        let a = h.items[0];
        h.send(ItemPointerEvent::Click(a));

        assert!(h.send(ItemPointerEvent::Miss(MouseButton::Right)).is_empty());
        assert_eq!(h.selected(), Some(a));
        assert!(h.state(0).selected);
    }

    #[test]
    fn hover_never_highlights_selected_item() {
        let mut h = Harness::new(1);
        let a = h.items[0];

        h.send(ItemPointerEvent::Enter(a));
        assert!(h.state(0).highlighted());

        h.send(ItemPointerEvent::Click(a));
        assert!(h.state(0).hovered);
        assert!(!h.state(0).highlighted());

        h.send(ItemPointerEvent::Leave(a));
        assert!(!h.state(0).hovered);
        assert!(!h.state(0).highlighted());
    }
}
