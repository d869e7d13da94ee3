use bevy::prelude::*;

/// Starting camera position and vertical field of view (degrees).
pub const CAMERA_START_POSITION: Vec3 = Vec3::new(-200.0, 200.0, 200.0);
pub const CAMERA_FOV_DEGREES: f32 = 10.0;

/// Ambient fill, roughly a half-intensity white light.
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

pub const SUN_POSITION: Vec3 = Vec3::new(1.5, 8.0, 5.0);
pub const SUN_ILLUMINANCE: f32 = 6_000.0;
/// Shadow volume of the sun: a single cascade covering this distance.
pub const SUN_SHADOW_MAX_DISTANCE: f32 = 100.0;
pub const SUN_SHADOW_FIRST_CASCADE_BOUND: f32 = 50.0;

/// Orbit limits.
pub const ORBIT_MAX_POLAR_ANGLE: f32 = std::f32::consts::PI / 2.2;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_ZOOM_SPEED: f32 = 0.1;

/// Polar angle the camera is forced to while following a selection.
pub const FOLLOW_POLAR_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

/// Fit helper settings.
pub const FIT_MARGIN: f32 = 2.0;
pub const FIT_ANIMATION_SPEED: f32 = 10.0;

/// Largest pointer travel (logical px) between press and release that still counts as a click.
pub const CLICK_DRAG_TOLERANCE: f32 = 2.0;

/// Transform widget, sized in screen pixels.
pub const WIDGET_SCREEN_SIZE: f32 = 75.0;
pub const WIDGET_LINE_WIDTH: f32 = 2.0;
pub const WIDGET_PICK_RADIUS: f32 = 8.0;
/// Plane slider square, as fractions of the axis length.
pub const WIDGET_SLIDER_OFFSET: f32 = 0.25;
pub const WIDGET_SLIDER_SIZE: f32 = 0.2;

pub const ITEM_COLOUR: Color = Color::WHITE;
pub const ITEM_HOVER_COLOUR: Color = Color::srgb(0.827, 0.827, 0.827);

pub const AXIS_X_COLOUR: Color = Color::srgb(1.0, 0.18, 0.33);
pub const AXIS_Y_COLOUR: Color = Color::srgb(0.54, 0.86, 0.0);
pub const AXIS_Z_COLOUR: Color = Color::srgb(0.17, 0.56, 1.0);
pub const AXIS_ACTIVE_COLOUR: Color = Color::srgb(1.0, 0.9, 0.0);

/// Orientation gizmo viewport: distance of its centre from the top-right corner and its size.
pub const ORIENTATION_GIZMO_MARGIN: f32 = 100.0;
pub const ORIENTATION_GIZMO_SIZE: f32 = 160.0;
