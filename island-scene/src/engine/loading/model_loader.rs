use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;

use crate::engine::assets::bounds::ModelBounds;
use crate::engine::assets::model_source::{ModelLoadState, ModelSource, SceneNodeError};
use crate::engine::loading::progress::LoadingProgress;

/// What a loaded model contributes to its entity.
#[derive(Debug)]
pub struct ResolvedModel {
    pub mesh: Handle<Mesh>,
    pub material: StandardMaterial,
    pub bounds: ModelBounds,
}

/// The parts of a loaded glTF that name geometry and materials.
#[derive(Clone, Copy)]
pub struct GltfIndex<'a> {
    pub named_nodes: &'a HashMap<Box<str>, Handle<GltfNode>>,
    pub named_meshes: &'a HashMap<Box<str>, Handle<GltfMesh>>,
    pub materials: &'a [Handle<StandardMaterial>],
}

impl<'a> From<&'a Gltf> for GltfIndex<'a> {
    fn from(gltf: &'a Gltf) -> Self {
        Self {
            named_nodes: &gltf.named_nodes,
            named_meshes: &gltf.named_meshes,
            materials: &gltf.materials,
        }
    }
}

/// Poll pending model sources and settle the ones whose load has finished.
pub fn resolve_model_sources(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    gltf_nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    meshes: Res<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut sources: Query<(Entity, &ModelSource, &mut ModelLoadState)>,
    mut progress: ResMut<LoadingProgress>,
) {
    let mut pending = 0;

    for (entity, source, mut state) in &mut sources {
        if state.is_settled() {
            continue;
        }

        let id = source.handle.id();
        let failed = matches!(asset_server.load_state(id), LoadState::Failed(_))
            || matches!(
                asset_server.recursive_dependency_load_state(id),
                RecursiveDependencyLoadState::Failed(_)
            );

        let result = if failed {
            Err(SceneNodeError::LoadFailed {
                path: source.path.clone(),
            })
        } else if asset_server.is_loaded_with_dependencies(id) {
            gltfs
                .get(&source.handle)
                .ok_or_else(|| SceneNodeError::LoadFailed {
                    path: source.path.clone(),
                })
                .and_then(|gltf| {
                    resolve_model(
                        source,
                        GltfIndex::from(gltf),
                        &gltf_nodes,
                        &gltf_meshes,
                        &meshes,
                        &materials,
                    )
                })
        } else {
            pending += 1;
            continue;
        };

        settle_model_source(
            &mut commands,
            entity,
            source,
            &mut state,
            result,
            &mut materials,
            &mut progress,
        );
    }

    progress.pending = pending;
}

/// Apply a finished resolution: a ready node gets its mesh, material and
/// bounds, a failed one is left without geometry.
pub fn settle_model_source(
    commands: &mut Commands,
    entity: Entity,
    source: &ModelSource,
    state: &mut ModelLoadState,
    result: Result<ResolvedModel, SceneNodeError>,
    materials: &mut Assets<StandardMaterial>,
    progress: &mut LoadingProgress,
) {
    match result {
        Ok(resolved) => {
            commands.entity(entity).insert((
                Mesh3d(resolved.mesh),
                MeshMaterial3d(materials.add(resolved.material)),
                resolved.bounds,
            ));
            *state = ModelLoadState::Ready;
            progress.ready += 1;
            info!("Model ready: {}", source.path);
        }
        Err(err) => {
            *state = ModelLoadState::Failed;
            progress.failed += 1;
            warn!("Omitting scene node: {}", err);
        }
    }
}

/// Pick the named geometry out of a loaded glTF and wrap its first material
/// in a fresh standard material.
pub fn resolve_model(
    source: &ModelSource,
    gltf: GltfIndex,
    gltf_nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
    materials: &Assets<StandardMaterial>,
) -> Result<ResolvedModel, SceneNodeError> {
    let missing_mesh = || SceneNodeError::MissingMesh {
        path: source.path.clone(),
        name: source.name.clone(),
    };
    let missing_primitive = || SceneNodeError::MissingPrimitive {
        path: source.path.clone(),
        name: source.name.clone(),
    };

    let gltf_mesh_handle = gltf
        .named_nodes
        .get(source.name.as_str())
        .and_then(|node| gltf_nodes.get(node))
        .and_then(|node| node.mesh.clone())
        .or_else(|| gltf.named_meshes.get(source.name.as_str()).cloned())
        .ok_or_else(missing_mesh)?;
    let gltf_mesh = gltf_meshes.get(&gltf_mesh_handle).ok_or_else(missing_mesh)?;

    let primitive = gltf_mesh.primitives.first().ok_or_else(missing_primitive)?;
    let bounds = meshes
        .get(&primitive.mesh)
        .and_then(Mesh::compute_aabb)
        .map(|aabb| ModelBounds::from_aabb(&aabb))
        .ok_or_else(missing_primitive)?;

    let material = gltf
        .materials
        .first()
        .and_then(|handle| materials.get(handle))
        .cloned()
        .ok_or_else(|| SceneNodeError::MissingMaterial {
            path: source.path.clone(),
        })?;

    Ok(ResolvedModel {
        mesh: primitive.mesh.clone(),
        material,
        bounds,
    })
}
