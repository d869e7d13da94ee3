use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use constants::path::{ISLAND_MODEL, OCEAN_MODEL, SKY_MODEL};

use crate::engine::assets::model_source::{ModelLoadState, ModelSource};
use crate::engine::core::config::SceneConfig;

/// The three non-interactive models that make up the backdrop.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticNode {
    Sky,
    Ocean,
    Island,
}

impl StaticNode {
    pub const ALL: [StaticNode; 3] = [StaticNode::Sky, StaticNode::Ocean, StaticNode::Island];

    pub fn model_name(self) -> &'static str {
        match self {
            Self::Sky => SKY_MODEL,
            Self::Ocean => OCEAN_MODEL,
            Self::Island => ISLAND_MODEL,
        }
    }

    /// Only the island takes the animals' shadows.
    pub fn receives_shadows(self) -> bool {
        matches!(self, Self::Island)
    }
}

pub fn spawn_static_nodes(
    commands: &mut Commands,
    asset_server: &AssetServer,
    config: &SceneConfig,
) {
    for node in StaticNode::ALL {
        let mut entity = commands.spawn((
            node,
            ModelSource::load(asset_server, &config.model_base_path, node.model_name()),
            ModelLoadState::Loading,
            Transform::IDENTITY,
            Visibility::default(),
            NotShadowCaster,
            Name::new(node.model_name()),
        ));
        if !node.receives_shadows() {
            entity.insert(NotShadowReceiver);
        }
    }
}
