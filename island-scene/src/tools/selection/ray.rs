use bevy::prelude::*;

use crate::engine::assets::bounds::ModelBounds;

/// Distance along the ray to the model's oriented bounding box, if hit.
pub fn ray_hits_obb(
    origin: Vec3,
    dir: Vec3,
    xf: &GlobalTransform,
    bounds: &ModelBounds,
) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let t = ray_aabb_hit_t(o_local, d_local, bounds.min(), bounds.max())?;
    // t is in local units; re-measure in world space so hits on scaled
    // boxes compare correctly.
    let hit = xf.transform_point(o_local + d_local * t);
    Some((hit - origin).length() / dir.length().max(f32::EPSILON))
}

/// Slab test against an axis-aligned box. Returns the distance to the entry
/// point, or to the exit point when the ray starts inside the box.
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut near = f32::NEG_INFINITY;
    let mut far = f32::INFINITY;

    for axis in 0..3 {
        let inv = if ray_direction[axis] != 0.0 {
            1.0 / ray_direction[axis]
        } else {
            f32::INFINITY
        };
        let t0 = (min[axis] - ray_origin[axis]) * inv;
        let t1 = (max[axis] - ray_origin[axis]) * inv;
        near = near.max(t0.min(t1));
        far = far.min(t0.max(t1));
        if near > far {
            return None;
        }
    }

    if far < 0.0 {
        return None;
    }
    Some(if near >= 0.0 { near } else { far })
}

/// Nearest hit among `candidates`; only the topmost object reacts to the pointer.
pub fn pick_nearest<'a, I>(ray: Ray3d, candidates: I) -> Option<(Entity, f32)>
where
    I: IntoIterator<Item = (Entity, &'a GlobalTransform, &'a ModelBounds)>,
{
    let origin = ray.origin;
    let dir = ray.direction.as_vec3();

    let mut best: Option<(Entity, f32)> = None;
    for (entity, xf, bounds) in candidates {
        if let Some(t) = ray_hits_obb(origin, dir, xf, bounds) {
            if best.is_none_or(|(_, best_t)| t < best_t) {
                best = Some((entity, t));
            }
        }
    }
    best
}
