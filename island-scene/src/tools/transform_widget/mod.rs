//! Translate-only transform widget attached to each item.
//!
//! The widget is drawn with gizmos at the max-x, min-y, min-z corner of its
//! item's bounds, scaled to a constant on-screen size. It is only visible
//! and interactive while its item is selected.

/// Handle drag state and the systems that grab and move items.
pub mod drag;

/// Widget frame layout, screen-space handle picking and drag math.
pub mod geometry;

use bevy::prelude::*;
use constants::render_settings::{
    AXIS_ACTIVE_COLOUR, AXIS_X_COLOUR, AXIS_Y_COLOUR, AXIS_Z_COLOUR, WIDGET_LINE_WIDTH,
    WIDGET_SCREEN_SIZE,
};

use crate::engine::assets::bounds::{ModelBounds, WorldBounds};
use crate::engine::camera::SceneCamera;
use crate::tools::selection::state::{Item, ItemState};
use drag::WidgetDrag;
use geometry::{WidgetAxis, WidgetGeometry, WidgetHandle, world_per_pixel};

/// Corner of the item bounds the widget sits on.
pub const WIDGET_ANCHOR: Vec3 = Vec3::new(1.0, -1.0, -1.0);

#[derive(Component, Debug, Clone, Copy)]
pub struct TransformWidget {
    pub item: Entity,
    pub hovered_handle: Option<WidgetHandle>,
}

impl TransformWidget {
    pub fn new(item: Entity) -> Self {
        Self {
            item,
            hovered_handle: None,
        }
    }
}

/// Gizmo group for widget lines, drawn over the scene.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct WidgetGizmos;

pub struct TransformWidgetPlugin;

impl Plugin for TransformWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WidgetDrag>()
            .init_gizmo_group::<WidgetGizmos>()
            .add_systems(Startup, configure_widget_gizmos);
    }
}

fn configure_widget_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<WidgetGizmos>();
    config.depth_bias = -1.0;
    config.line.width = WIDGET_LINE_WIDTH;
}

/// Lay out the widget for this frame: origin on the bounds anchor, frame
/// from the widget's own rotation, arrows sized to a fixed pixel length.
pub fn widget_geometry(
    camera: &Camera,
    camera_xf: &GlobalTransform,
    projection: &Projection,
    widget_xf: &GlobalTransform,
    item_bounds: &WorldBounds,
) -> Option<WidgetGeometry> {
    let Projection::Perspective(perspective) = projection else {
        return None;
    };
    let viewport_height = camera.logical_viewport_size()?.y;
    let origin = item_bounds.anchor_point(WIDGET_ANCHOR);
    let scale = world_per_pixel(
        camera_xf.translation(),
        camera_xf.forward().as_vec3(),
        origin,
        perspective.fov,
        viewport_height,
    );
    Some(WidgetGeometry::new(
        origin,
        widget_xf.rotation(),
        WIDGET_SCREEN_SIZE * scale,
    ))
}

/// Show the widget of the selected item, hide all others.
pub fn sync_widget_visibility(
    items: Query<&ItemState, (With<Item>, Changed<ItemState>)>,
    mut widgets: Query<(&TransformWidget, &mut Visibility)>,
) {
    for (widget, mut visibility) in &mut widgets {
        let Ok(state) = items.get(widget.item) else {
            continue;
        };
        let wanted = if state.selected {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

fn axis_colour(axis: WidgetAxis) -> Color {
    match axis {
        WidgetAxis::X => AXIS_X_COLOUR,
        WidgetAxis::Y => AXIS_Y_COLOUR,
        WidgetAxis::Z => AXIS_Z_COLOUR,
    }
}

fn handle_colour(handle: WidgetHandle, lit: Option<WidgetHandle>) -> Color {
    if lit == Some(handle) {
        return AXIS_ACTIVE_COLOUR;
    }
    match handle {
        WidgetHandle::Axis(axis) | WidgetHandle::Plane(axis) => axis_colour(axis),
    }
}

pub fn draw_transform_widgets(
    mut gizmos: Gizmos<WidgetGizmos>,
    drag: Res<WidgetDrag>,
    cameras: Query<(&Camera, &GlobalTransform, &Projection), With<SceneCamera>>,
    items: Query<(&ModelBounds, &GlobalTransform), With<Item>>,
    widgets: Query<(&TransformWidget, &GlobalTransform, &Visibility)>,
) {
    let Ok((camera, camera_xf, projection)) = cameras.single() else {
        return;
    };

    for (widget, widget_xf, visibility) in &widgets {
        if *visibility == Visibility::Hidden {
            continue;
        }
        let Ok((bounds, item_xf)) = items.get(widget.item) else {
            continue;
        };
        let Some(geometry) =
            widget_geometry(camera, camera_xf, projection, widget_xf, &bounds.to_world(item_xf))
        else {
            continue;
        };

        let lit = match drag.active {
            Some(active) if active.item == widget.item => Some(active.handle),
            _ => widget.hovered_handle,
        };

        for axis in WidgetAxis::ALL {
            let colour = handle_colour(WidgetHandle::Axis(axis), lit);
            gizmos.arrow(geometry.origin, geometry.axis_tip(axis), colour);

            let corners = geometry.plane_corners(axis);
            let colour = handle_colour(WidgetHandle::Plane(axis), lit);
            gizmos.linestrip(
                [corners[0], corners[1], corners[2], corners[3], corners[0]],
                colour,
            );
        }
    }
}
