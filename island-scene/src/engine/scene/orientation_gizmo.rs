use bevy::prelude::*;
use bevy::render::camera::{ClearColorConfig, Viewport};
use bevy::render::view::RenderLayers;
use bevy::window::PrimaryWindow;
use constants::render_settings::{
    AXIS_X_COLOUR, AXIS_Y_COLOUR, AXIS_Z_COLOUR, ORIENTATION_GIZMO_MARGIN,
    ORIENTATION_GIZMO_SIZE,
};

use crate::engine::camera::SceneCamera;

/// Layer the gizmo meshes live on, invisible to the scene camera.
pub const ORIENTATION_GIZMO_LAYER: usize = 1;

const GIZMO_CAMERA_DISTANCE: f32 = 5.0;

#[derive(Component)]
pub struct OrientationGizmoCamera;

/// Small view cube with positive axes, drawn by its own camera into a
/// square viewport in the top-right corner and rotated with the scene camera.
pub fn spawn_orientation_gizmo(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let layer = RenderLayers::layer(ORIENTATION_GIZMO_LAYER);

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_length(0.85))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.85, 0.85),
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
        layer.clone(),
        Name::new("OrientationCube"),
    ));

    let axes = [
        (Vec3::X, AXIS_X_COLOUR),
        (Vec3::Y, AXIS_Y_COLOUR),
        (Vec3::Z, AXIS_Z_COLOUR),
    ];
    for (direction, colour) in axes {
        let length = 1.2;
        let size = Vec3::splat(0.06) + direction * (length - 0.06);
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: colour,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(direction * length * 0.5),
            layer.clone(),
            Name::new("OrientationAxis"),
        ));
    }

    commands.spawn((
        Camera3d::default(),
        Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, GIZMO_CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        layer,
        OrientationGizmoCamera,
        Name::new("OrientationGizmoCamera"),
    ));
}

/// Square viewport anchored `margin` px from the top-right corner, in physical pixels.
/// `None` when the window is too small to hold it.
pub fn gizmo_viewport(
    physical_size: UVec2,
    scale_factor: f32,
    margin: f32,
    size: f32,
) -> Option<Viewport> {
    let side = (size * scale_factor).round() as u32;
    let centre_from_edge = (margin * scale_factor).round() as u32;
    let half = side / 2;

    let x = physical_size.x.checked_sub(centre_from_edge + half)?;
    let y = centre_from_edge.checked_sub(half)?;
    if side == 0 || y + side > physical_size.y {
        return None;
    }

    Some(Viewport {
        physical_position: UVec2::new(x, y),
        physical_size: UVec2::splat(side),
        ..default()
    })
}

fn same_viewport(a: Option<&Viewport>, b: Option<&Viewport>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.physical_position == b.physical_position && a.physical_size == b.physical_size
        }
        (None, None) => true,
        _ => false,
    }
}

/// Follow the scene camera's orientation and keep the viewport pinned to the corner.
pub fn update_orientation_gizmo(
    windows: Query<&Window, With<PrimaryWindow>>,
    scene_cameras: Query<&GlobalTransform, (With<SceneCamera>, Without<OrientationGizmoCamera>)>,
    mut gizmo_cameras: Query<(&mut Camera, &mut Transform), With<OrientationGizmoCamera>>,
) {
    let Ok((mut camera, mut transform)) = gizmo_cameras.single_mut() else {
        return;
    };
    let Ok(scene_transform) = scene_cameras.single() else {
        return;
    };

    let rotation = scene_transform.rotation();
    transform.rotation = rotation;
    transform.translation = rotation * Vec3::Z * GIZMO_CAMERA_DISTANCE;

    if let Ok(window) = windows.single() {
        let viewport = gizmo_viewport(
            window.physical_size(),
            window.scale_factor(),
            ORIENTATION_GIZMO_MARGIN,
            ORIENTATION_GIZMO_SIZE,
        );
        let active = viewport.is_some();
        if camera.is_active != active {
            camera.is_active = active;
        }
        if !same_viewport(camera.viewport.as_ref(), viewport.as_ref()) {
            camera.viewport = viewport;
        }
    }
}
