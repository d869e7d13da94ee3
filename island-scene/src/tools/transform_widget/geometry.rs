use bevy::prelude::*;
use constants::render_settings::{WIDGET_PICK_RADIUS, WIDGET_SLIDER_OFFSET, WIDGET_SLIDER_SIZE};

/// Axis of the widget frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAxis {
    X,
    Y,
    Z,
}

impl WidgetAxis {
    pub const ALL: [WidgetAxis; 3] = [WidgetAxis::X, WidgetAxis::Y, WidgetAxis::Z];

    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// The two axes spanning the plane this axis is normal to.
    pub fn plane_axes(self) -> (WidgetAxis, WidgetAxis) {
        match self {
            Self::X => (Self::Y, Self::Z),
            Self::Y => (Self::X, Self::Z),
            Self::Z => (Self::X, Self::Y),
        }
    }
}

/// Grabbable part of the widget: an arrow moves along its axis, a plane
/// slider moves within the plane normal to its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetHandle {
    Axis(WidgetAxis),
    Plane(WidgetAxis),
}

/// World-space layout of one widget for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetGeometry {
    pub origin: Vec3,
    pub axes: [Vec3; 3],
    pub length: f32,
}

impl WidgetGeometry {
    pub fn new(origin: Vec3, rotation: Quat, length: f32) -> Self {
        Self {
            origin,
            axes: [rotation * Vec3::X, rotation * Vec3::Y, rotation * Vec3::Z],
            length,
        }
    }

    pub fn axis(&self, axis: WidgetAxis) -> Vec3 {
        self.axes[axis.index()]
    }

    pub fn axis_tip(&self, axis: WidgetAxis) -> Vec3 {
        self.origin + self.axis(axis) * self.length
    }

    /// Corners of the slider square for the plane normal to `normal`, in winding order.
    pub fn plane_corners(&self, normal: WidgetAxis) -> [Vec3; 4] {
        let (a, b) = normal.plane_axes();
        let (u, v) = (self.axis(a) * self.length, self.axis(b) * self.length);
        let lo = WIDGET_SLIDER_OFFSET;
        let hi = WIDGET_SLIDER_OFFSET + WIDGET_SLIDER_SIZE;
        [
            self.origin + u * lo + v * lo,
            self.origin + u * hi + v * lo,
            self.origin + u * hi + v * hi,
            self.origin + u * lo + v * hi,
        ]
    }

    /// Handle under `cursor`, testing in viewport space. Plane sliders win
    /// over arrows because they sit between them.
    pub fn pick(&self, cursor: Vec2, project: impl Fn(Vec3) -> Option<Vec2>) -> Option<WidgetHandle> {
        for normal in WidgetAxis::ALL {
            let corners = self.plane_corners(normal);
            let projected: Option<Vec<Vec2>> = corners.iter().map(|c| project(*c)).collect();
            if let Some(quad) = projected {
                if point_in_quad(cursor, [quad[0], quad[1], quad[2], quad[3]]) {
                    return Some(WidgetHandle::Plane(normal));
                }
            }
        }

        let origin = project(self.origin)?;
        WidgetAxis::ALL
            .into_iter()
            .filter_map(|axis| {
                let tip = project(self.axis_tip(axis))?;
                let distance = distance_to_segment(cursor, origin, tip);
                (distance <= WIDGET_PICK_RADIUS).then_some((axis, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(axis, _)| WidgetHandle::Axis(axis))
    }
}

/// World units covered by one logical pixel at `point` for a perspective camera.
pub fn world_per_pixel(camera_position: Vec3, camera_forward: Vec3, point: Vec3, fov: f32, viewport_height: f32) -> f32 {
    let depth = (point - camera_position).dot(camera_forward).max(f32::EPSILON);
    2.0 * depth * (fov * 0.5).tan() / viewport_height.max(1.0)
}

pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Convex quad containment, either winding.
pub fn point_in_quad(p: Vec2, quad: [Vec2; 4]) -> bool {
    let mut sign = 0.0_f32;
    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let cross = (b - a).perp_dot(p - a);
        if cross.abs() <= f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Parameter along the line `line_origin + s * line_dir` closest to the ray.
/// `None` when the ray runs parallel to the line.
pub fn closest_param_on_line(ray_origin: Vec3, ray_dir: Vec3, line_origin: Vec3, line_dir: Vec3) -> Option<f32> {
    let w0 = line_origin - ray_origin;
    let a = line_dir.dot(line_dir);
    let b = line_dir.dot(ray_dir);
    let c = ray_dir.dot(ray_dir);
    let d = line_dir.dot(w0);
    let e = ray_dir.dot(w0);
    let denom = a * c - b * b;
    if denom.abs() <= 1e-6 {
        return None;
    }
    Some((b * e - c * d) / denom)
}

/// Where the ray crosses the plane through `plane_origin` with `normal`, in front of the ray.
pub fn ray_plane_point(ray_origin: Vec3, ray_dir: Vec3, plane_origin: Vec3, normal: Vec3) -> Option<Vec3> {
    let denom = normal.dot(ray_dir);
    if denom.abs() <= 1e-6 {
        return None;
    }
    let t = normal.dot(plane_origin - ray_origin) / denom;
    (t >= 0.0).then(|| ray_origin + ray_dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_geometry() -> WidgetGeometry {
        WidgetGeometry::new(Vec3::ZERO, Quat::IDENTITY, 1.0)
    }

    // Orthographic-style projection onto the XY plane, 100 px per unit.
    fn project_xy(p: Vec3) -> Option<Vec2> {
        Some(Vec2::new(p.x, p.y) * 100.0)
    }

    #[test]
    fn rotated_frame_maps_axes() {
        let geometry = WidgetGeometry::new(
            Vec3::ZERO,
            Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2),
            1.0,
        );
        assert!((geometry.axis(WidgetAxis::X) - Vec3::Z).length() < 1e-5);
        assert!((geometry.axis(WidgetAxis::Z) - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn pick_prefers_plane_slider_inside_square() {
        let geometry = identity_geometry();
        // Centre of the XY slider: 0.35 along both X and Y.
        let handle = geometry.pick(Vec2::new(35.0, 35.0), project_xy);
        assert_eq!(handle, Some(WidgetHandle::Plane(WidgetAxis::Z)));
    }

    #[test]
    fn pick_arrow_near_its_segment() {
        let geometry = identity_geometry();
        assert_eq!(
            geometry.pick(Vec2::new(80.0, 3.0), project_xy),
            Some(WidgetHandle::Axis(WidgetAxis::X))
        );
        assert_eq!(
            geometry.pick(Vec2::new(-4.0, 90.0), project_xy),
            Some(WidgetHandle::Axis(WidgetAxis::Y))
        );
        assert_eq!(geometry.pick(Vec2::new(300.0, 300.0), project_xy), None);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Vec2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Vec2::new(13.0, 4.0), a, b), 5.0);
    }

    #[test]
    fn quad_containment_ignores_winding() {
        let square = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        let mut reversed = square;
        reversed.reverse();
        assert!(point_in_quad(Vec2::splat(0.5), square));
        assert!(point_in_quad(Vec2::splat(0.5), reversed));
        assert!(!point_in_quad(Vec2::new(1.5, 0.5), square));
    }

    #[test]
    fn axis_drag_follows_ray_over_line() {
        // Ray straight down at x = 3 against the X axis.
        let s = closest_param_on_line(Vec3::new(3.0, 10.0, 0.0), Vec3::NEG_Y, Vec3::ZERO, Vec3::X);
        assert!((s.unwrap() - 3.0).abs() < 1e-5);

        assert!(closest_param_on_line(Vec3::Y, Vec3::X, Vec3::ZERO, Vec3::X).is_none());
    }

    #[test]
    fn plane_drag_intersects_ground() {
        let hit = ray_plane_point(Vec3::new(1.0, 5.0, 2.0), Vec3::NEG_Y, Vec3::ZERO, Vec3::Y);
        assert_eq!(hit, Some(Vec3::new(1.0, 0.0, 2.0)));
        assert!(ray_plane_point(Vec3::new(1.0, 5.0, 2.0), Vec3::Y, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn pixel_scale_grows_with_depth() {
        let near = world_per_pixel(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -10.0), 1.0, 500.0);
        let far = world_per_pixel(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -20.0), 1.0, 500.0);
        assert!((far - 2.0 * near).abs() < 1e-6);
    }
}
