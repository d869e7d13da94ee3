use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::TransformWidget;
use super::geometry::{WidgetHandle, closest_param_on_line, ray_plane_point};
use super::widget_geometry;
use crate::engine::assets::bounds::ModelBounds;
use crate::engine::camera::SceneCamera;
use crate::tools::selection::state::{Item, ItemState};

/// The handle grab in progress, if any. While active, orbit input and item
/// clicks are suppressed.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct WidgetDrag {
    pub active: Option<ActiveDrag>,
}

impl WidgetDrag {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

/// Everything fixed at the moment a handle is grabbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub item: Entity,
    pub pivot: Entity,
    pub handle: WidgetHandle,
    /// Widget origin when grabbed.
    pub origin: Vec3,
    /// Arrow direction for axis drags, plane normal for plane drags.
    pub direction: Vec3,
    pub grab_point: Vec3,
    pub start_translation: Vec3,
}

impl ActiveDrag {
    /// Point under the ray on the constraint line or plane.
    fn constrained_point(handle: WidgetHandle, origin: Vec3, direction: Vec3, ray: Ray3d) -> Option<Vec3> {
        let ray_dir = ray.direction.as_vec3();
        match handle {
            WidgetHandle::Axis(_) => {
                closest_param_on_line(ray.origin, ray_dir, origin, direction).map(|s| origin + direction * s)
            }
            WidgetHandle::Plane(_) => ray_plane_point(ray.origin, ray_dir, origin, direction),
        }
    }

    pub fn begin(
        item: Entity,
        pivot: Entity,
        handle: WidgetHandle,
        origin: Vec3,
        direction: Vec3,
        start_translation: Vec3,
        ray: Ray3d,
    ) -> Option<Self> {
        let grab_point = Self::constrained_point(handle, origin, direction, ray)?;
        Some(Self {
            item,
            pivot,
            handle,
            origin,
            direction,
            grab_point,
            start_translation,
        })
    }

    /// Pivot translation for the current pointer ray. `None` keeps the last one.
    pub fn translation_for(&self, ray: Ray3d) -> Option<Vec3> {
        let point = Self::constrained_point(self.handle, self.origin, self.direction, ray)?;
        Some(self.start_translation + (point - self.grab_point))
    }
}

/// Hover test for widgets of selected items.
pub fn hover_widget_handles(
    drag: Res<WidgetDrag>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform, &Projection), With<SceneCamera>>,
    items: Query<(&ItemState, &ModelBounds, &GlobalTransform), With<Item>>,
    mut widgets: Query<(&mut TransformWidget, &GlobalTransform, &Visibility)>,
) {
    // Keep the grabbed handle lit for the whole drag.
    if drag.is_active() {
        return;
    }
    let cursor = windows.single().ok().and_then(Window::cursor_position);
    let camera = cameras.single().ok();

    for (mut widget, widget_xf, visibility) in &mut widgets {
        let handle = (|| {
            if *visibility == Visibility::Hidden {
                return None;
            }
            let cursor = cursor?;
            let (camera, camera_xf, projection) = camera?;
            let (state, bounds, item_xf) = items.get(widget.item).ok()?;
            if !state.selected {
                return None;
            }
            let geometry = widget_geometry(camera, camera_xf, projection, widget_xf, &bounds.to_world(item_xf))?;
            geometry.pick(cursor, |p| camera.world_to_viewport(camera_xf, p).ok())
        })();

        if widget.hovered_handle != handle {
            widget.hovered_handle = handle;
        }
    }
}

/// Grab the hovered handle on primary press.
pub fn start_widget_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    mut drag: ResMut<WidgetDrag>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform, &Projection), With<SceneCamera>>,
    items: Query<(&Item, &ModelBounds, &GlobalTransform)>,
    pivots: Query<&Transform>,
    widgets: Query<(&TransformWidget, &GlobalTransform)>,
) {
    if !buttons.just_pressed(MouseButton::Left) || drag.is_active() {
        return;
    }
    let Some(cursor) = windows.single().ok().and_then(Window::cursor_position) else {
        return;
    };
    let Ok((camera, camera_xf, projection)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_xf, cursor) else {
        return;
    };

    for (widget, widget_xf) in &widgets {
        let Some(handle) = widget.hovered_handle else {
            continue;
        };
        let Ok((item, bounds, item_xf)) = items.get(widget.item) else {
            continue;
        };
        let Ok(pivot) = pivots.get(item.pivot) else {
            continue;
        };
        let Some(geometry) =
            widget_geometry(camera, camera_xf, projection, widget_xf, &bounds.to_world(item_xf))
        else {
            continue;
        };

        let direction = match handle {
            WidgetHandle::Axis(axis) | WidgetHandle::Plane(axis) => geometry.axis(axis),
        };
        if let Some(active) = ActiveDrag::begin(
            widget.item,
            item.pivot,
            handle,
            geometry.origin,
            direction,
            pivot.translation,
            ray,
        ) {
            drag.active = Some(active);
            return;
        }
    }
}

/// Move the grabbed item's pivot with the pointer; release ends the drag.
pub fn update_widget_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    mut drag: ResMut<WidgetDrag>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    items: Query<&Item>,
    mut pivots: Query<&mut Transform>,
) {
    let Some(active) = drag.active else { return };

    if !buttons.pressed(MouseButton::Left) {
        drag.active = None;
        if let (Ok(item), Ok(pivot)) = (items.get(active.item), pivots.get(active.pivot)) {
            info!("Moved {} to {:?}", item.name, pivot.translation);
        }
        return;
    }

    let Some(cursor) = windows.single().ok().and_then(Window::cursor_position) else {
        return;
    };
    let Ok((camera, camera_xf)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_xf, cursor) else {
        return;
    };
    let Some(translation) = active.translation_for(ray) else {
        return;
    };
    if let Ok(mut pivot) = pivots.get_mut(active.pivot) {
        pivot.translation = translation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::transform_widget::geometry::WidgetAxis;

    fn ray_down_at(x: f32, z: f32) -> Ray3d {
        Ray3d::new(Vec3::new(x, 10.0, z), Dir3::NEG_Y)
    }

    fn drag(handle: WidgetHandle, direction: Vec3, ray: Ray3d) -> ActiveDrag {
        ActiveDrag::begin(
            Entity::PLACEHOLDER,
            Entity::PLACEHOLDER,
            handle,
            Vec3::ZERO,
            direction,
            Vec3::new(5.0, 0.0, 5.0),
            ray,
        )
        .unwrap()
    }

    #[test]
    fn axis_drag_moves_only_along_axis() {
        let active = drag(WidgetHandle::Axis(WidgetAxis::X), Vec3::X, ray_down_at(1.0, 0.0));
        let moved = active.translation_for(ray_down_at(3.0, 4.0)).unwrap();
        assert!((moved - Vec3::new(7.0, 0.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn plane_drag_follows_pointer_within_plane() {
        let active = drag(WidgetHandle::Plane(WidgetAxis::Y), Vec3::Y, ray_down_at(1.0, 1.0));
        let moved = active.translation_for(ray_down_at(2.0, -1.0)).unwrap();
        assert!((moved - Vec3::new(6.0, 0.0, 3.0)).length() < 1e-4);
    }

    #[test]
    fn grab_point_offset_is_preserved() {
        let active = drag(WidgetHandle::Axis(WidgetAxis::Z), Vec3::Z, ray_down_at(0.0, 2.0));
        assert_eq!(active.translation_for(ray_down_at(0.0, 2.0)), Some(Vec3::new(5.0, 0.0, 5.0)));
    }

    #[test]
    fn parallel_ray_cannot_grab_axis() {
        let along_axis = Ray3d::new(Vec3::new(0.0, 1.0, 0.0), Dir3::X);
        assert!(
            ActiveDrag::begin(
                Entity::PLACEHOLDER,
                Entity::PLACEHOLDER,
                WidgetHandle::Axis(WidgetAxis::X),
                Vec3::ZERO,
                Vec3::X,
                Vec3::ZERO,
                along_axis,
            )
            .is_none()
        );
    }

    #[test]
    fn release_ends_drag() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<MouseButton>>()
            .insert_resource(WidgetDrag {
                active: Some(drag(WidgetHandle::Axis(WidgetAxis::X), Vec3::X, ray_down_at(0.0, 0.0))),
            })
            .add_systems(Update, update_widget_drag);

        app.update();
        assert!(!app.world().resource::<WidgetDrag>().is_active());
    }
}
