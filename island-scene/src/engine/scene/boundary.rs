use bevy::prelude::*;
use constants::placement::BOUNDARY_VOLUME_SIZE;

use crate::engine::assets::bounds::ModelBounds;

/// Marker for the invisible volume the camera frames when nothing is selected.
#[derive(Component)]
pub struct BoundaryVolume;

pub fn spawn_boundary_volume(commands: &mut Commands, meshes: &mut Assets<Mesh>) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_length(BOUNDARY_VOLUME_SIZE))),
        Transform::IDENTITY,
        Visibility::Hidden,
        ModelBounds::cube(BOUNDARY_VOLUME_SIZE),
        BoundaryVolume,
        Name::new("BoundaryVolume"),
    ));
}
