use bevy::prelude::*;
use constants::coordinate_system::permute_placement;
use rand::Rng;
use std::f32::consts::TAU;

/// Where one animal sits on the island. Created once at startup, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    pub name: String,
    pub position: Vec3,
    pub rotate_y: f32,
}

impl PlacementRecord {
    /// Random spot on the ground plane inside `[-range, range)` with a random heading.
    pub fn scatter<R: Rng + ?Sized>(name: &str, range: f32, rng: &mut R) -> Self {
        Self {
            name: name.to_string(),
            position: Vec3::new(
                rng.gen_range(-range..range),
                0.0,
                rng.gen_range(-range..range),
            ),
            rotate_y: rng.gen_range(0.0..TAU),
        }
    }

    /// Base transform of the item's pivot. Translation only, with the record's
    /// axes permuted into world space.
    pub fn pivot_transform(&self) -> Transform {
        let (x, y, z) = permute_placement(self.position.x, self.position.y, self.position.z);
        Transform::from_xyz(x, y, z)
    }

    /// Heading of the model inside its pivot.
    pub fn model_transform(&self) -> Transform {
        Transform::from_rotation(Quat::from_rotation_y(self.rotate_y))
    }
}

/// The fixed list of placements for this session.
#[derive(Resource, Debug, Clone, Default)]
pub struct Placements {
    pub records: Vec<PlacementRecord>,
}

impl Placements {
    pub fn scatter<R: Rng + ?Sized>(names: &[&str], range: f32, rng: &mut R) -> Self {
        Self {
            records: names
                .iter()
                .map(|name| PlacementRecord::scatter(name, range, rng))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
