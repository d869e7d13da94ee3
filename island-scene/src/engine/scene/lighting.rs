use bevy::pbr::CascadeShadowConfigBuilder;
use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, SUN_ILLUMINANCE, SUN_POSITION, SUN_SHADOW_FIRST_CASCADE_BOUND,
    SUN_SHADOW_MAX_DISTANCE,
};

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    // One cascade covering a fixed shadow volume.
    let cascades = CascadeShadowConfigBuilder {
        num_cascades: 1,
        minimum_distance: 1.0,
        first_cascade_far_bound: SUN_SHADOW_FIRST_CASCADE_BOUND,
        maximum_distance: SUN_SHADOW_MAX_DISTANCE,
        ..default()
    }
    .build();

    commands.spawn((
        DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        cascades,
        Name::new("Sun"),
    ));
}
