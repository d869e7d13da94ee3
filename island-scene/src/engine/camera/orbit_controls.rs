use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::render_settings::{ORBIT_MAX_POLAR_ANGLE, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED};

use crate::engine::camera::SceneCamera;
use crate::tools::transform_widget::drag::WidgetDrag;

/// Orbit camera around `target`, addressed in spherical coordinates.
///
/// `azimuth` is measured around +Y from +Z, `polar` down from +Y. While
/// `enabled` is false user input is ignored, but the angles can still be set
/// programmatically.
#[derive(Resource, Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    pub target: Vec3,
    pub radius: f32,
    azimuth: f32,
    polar: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            target: Vec3::ZERO,
            radius: 10.0,
            azimuth: 0.0,
            polar: std::f32::consts::FRAC_PI_4,
            min_polar_angle: 0.0,
            max_polar_angle: ORBIT_MAX_POLAR_ANGLE,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
        }
    }
}

impl OrbitControls {
    /// Controls looking at `target` from `position`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let mut controls = Self {
            target,
            ..default()
        };
        let offset = position - target;
        controls.radius = offset.length().max(f32::EPSILON);
        controls.set_azimuthal_angle(offset.x.atan2(offset.z));
        controls.set_polar_angle((offset.y / controls.radius).clamp(-1.0, 1.0).acos());
        controls
    }

    pub fn azimuthal_angle(&self) -> f32 {
        self.azimuth
    }

    pub fn polar_angle(&self) -> f32 {
        self.polar
    }

    pub fn set_azimuthal_angle(&mut self, angle: f32) {
        self.azimuth = angle;
    }

    /// Polar angle is clamped to `[min_polar_angle, max_polar_angle]`.
    pub fn set_polar_angle(&mut self, angle: f32) {
        self.polar = angle.clamp(self.min_polar_angle, self.max_polar_angle);
    }

    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.set_azimuthal_angle(self.azimuth + delta_azimuth);
        self.set_polar_angle(self.polar + delta_polar);
    }

    /// Scale the orbit radius; `factor < 1` moves closer.
    pub fn zoom(&mut self, factor: f32) {
        self.radius = (self.radius * factor).clamp(self.min_distance, self.max_distance);
    }

    pub fn pan(&mut self, offset: Vec3) {
        self.target += offset;
    }

    pub fn camera_position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    pub fn camera_transform(&self) -> Transform {
        Transform::from_translation(self.camera_position()).looking_at(self.target, Vec3::Y)
    }
}

/// Left drag rotates, right drag pans in screen space, wheel zooms.
pub fn orbit_controls_input(
    controls: Option<ResMut<OrbitControls>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    widget_drag: Res<WidgetDrag>,
    cameras: Query<(&Camera, &Projection), With<SceneCamera>>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.01,
        })
        .sum();

    let Some(mut controls) = controls else { return };
    if !controls.enabled || widget_drag.is_active() {
        return;
    }

    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        let speed = controls.rotate_speed;
        controls.rotate(-mouse_delta.x * speed, -mouse_delta.y * speed);
    }

    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        if let Ok((camera, Projection::Perspective(perspective))) = cameras.single() {
            let viewport_height = camera
                .logical_viewport_size()
                .map_or(1.0, |size| size.y.max(1.0));
            let world_per_pixel =
                2.0 * controls.radius * (perspective.fov * 0.5).tan() / viewport_height;
            let view = controls.camera_transform();
            let offset = (-view.right() * mouse_delta.x + view.up() * mouse_delta.y) * world_per_pixel;
            controls.pan(offset);
        }
    }

    if scroll.abs() > f32::EPSILON {
        let factor = (1.0 - controls.zoom_speed).powf(scroll);
        controls.zoom(factor);
    }
}

/// Place the scene camera on its orbit.
pub fn apply_orbit_camera(
    controls: Option<Res<OrbitControls>>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
) {
    let Some(controls) = controls else { return };
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };
    *transform = controls.camera_transform();
}
