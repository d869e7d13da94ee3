use bevy::prelude::*;
use bevy::render::primitives::Aabb;

/// Bounding box of a model in its own local space.
/// Inserted once the model's mesh is ready; entities without it are not pickable.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl ModelBounds {
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            center: Vec3::from(aabb.center),
            half_extents: Vec3::from(aabb.half_extents),
        }
    }

    /// Axis-aligned cube of edge `size` centred on the origin.
    pub fn cube(size: f32) -> Self {
        Self {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(size * 0.5),
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min(), self.max());
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ]
    }

    /// World-space box enclosing this box after `transform`.
    pub fn to_world(&self, transform: &GlobalTransform) -> WorldBounds {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in self.corners() {
            let p = transform.transform_point(corner);
            min = min.min(p);
            max = max.max(p);
        }
        WorldBounds { min, max }
    }
}

/// Axis-aligned box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldBounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Point on or inside the box picked by `anchor`, each component in [-1, 1].
    /// `(1, -1, -1)` is the max-x, min-y, min-z corner.
    pub fn anchor_point(&self, anchor: Vec3) -> Vec3 {
        self.center() + anchor * self.size() * 0.5
    }
}
