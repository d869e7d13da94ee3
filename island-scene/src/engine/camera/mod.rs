//! Scene camera, orbit controls and the fit-to-bounds helper.
//!
//! The orbit controls own the camera pose. Everything else (fit animation,
//! the selection follow tick) only moves the orbit, and `apply_orbit_camera`
//! writes the final transform once per frame.

/// Fit-to-bounds helper: framing requests, clip planes and observe-on-resize.
pub mod bounds_fit;

/// Orbit controls resource with drag/wheel input and camera placement.
pub mod orbit_controls;

use bevy::pbr::ShadowFilteringMethod;
use bevy::prelude::*;
use constants::render_settings::{CAMERA_FOV_DEGREES, CAMERA_START_POSITION};

use orbit_controls::OrbitControls;

/// The main perspective camera the scene is viewed and picked through.
#[derive(Component)]
pub struct SceneCamera;

pub fn spawn_scene_camera(commands: &mut Commands) {
    let controls = OrbitControls::from_position(CAMERA_START_POSITION, Vec3::ZERO);

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        controls.camera_transform(),
        ShadowFilteringMethod::Gaussian,
        SceneCamera,
        Name::new("SceneCamera"),
    ));
    commands.insert_resource(controls);
}
