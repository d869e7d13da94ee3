use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::path::MODEL_EXTENSION;
use thiserror::Error;

/// A glTF model requested for this entity. `name` selects the node (or mesh)
/// whose geometry the entity displays.
#[derive(Component, Debug, Clone)]
pub struct ModelSource {
    pub name: String,
    pub path: String,
    pub handle: Handle<Gltf>,
}

impl ModelSource {
    pub fn load(asset_server: &AssetServer, base_path: &str, name: &str) -> Self {
        let path = model_path(base_path, name);
        Self {
            name: name.to_string(),
            handle: asset_server.load(path.clone()),
            path,
        }
    }
}

/// Per-node loading state. Nodes only render and take part in picking once `Ready`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelLoadState {
    #[default]
    Loading,
    Ready,
    Failed,
}

impl ModelLoadState {
    pub fn is_settled(self) -> bool {
        self != Self::Loading
    }
}

/// Recoverable per-node faults. A failing node is left out of the scene.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneNodeError {
    #[error("failed to load model `{path}`")]
    LoadFailed { path: String },
    #[error("model `{path}` has no node or mesh named `{name}`")]
    MissingMesh { path: String, name: String },
    #[error("mesh `{name}` in `{path}` has no usable primitive")]
    MissingPrimitive { path: String, name: String },
    #[error("model `{path}` defines no material")]
    MissingMaterial { path: String },
}

pub fn model_path(base_path: &str, name: &str) -> String {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        format!("{}.{}", name, MODEL_EXTENSION)
    } else {
        format!("{}/{}.{}", base, name, MODEL_EXTENSION)
    }
}
