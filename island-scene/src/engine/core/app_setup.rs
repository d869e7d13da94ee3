use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::transform::TransformSystem;
use constants::placement::ANIMAL_MODELS;
// Crate engine modules
use crate::engine::assets::placement::Placements;
use crate::engine::camera::bounds_fit::{
    BoundsFit, FitRequest, animate_fit, apply_fit_requests, observe_window_resize, track_fit_view,
};
use crate::engine::camera::orbit_controls::{apply_orbit_camera, orbit_controls_input};
use crate::engine::camera::spawn_scene_camera;
use crate::engine::core::app_state::{AppState, fit_boundary_on_start, transition_to_running};
use crate::engine::core::config::SceneConfig;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::model_loader::resolve_model_sources;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::boundary::spawn_boundary_volume;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::orientation_gizmo::{spawn_orientation_gizmo, update_orientation_gizmo};
use crate::engine::scene::static_nodes::spawn_static_nodes;
// Crate tools modules
use crate::tools::annotation::AnnotationPlugin;
use crate::tools::items::{follow_selected_item, spawn_items};
use crate::tools::selection::SelectionPlugin;
use crate::tools::selection::interactions::{
    apply_item_highlight, apply_item_pointer_events, detect_item_pointer_events,
    sync_selected_flags, update_hover_cursor,
};
use crate::tools::transform_widget::drag::{
    hover_widget_handles, start_widget_drag, update_widget_drag,
};
use crate::tools::transform_widget::{
    TransformWidgetPlugin, draw_transform_widgets, sync_widget_visibility,
};

/// Per-frame ordering: raw input, then the selection store and everything
/// derived from it, then the camera.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneSet {
    Input,
    Selection,
    Camera,
}

pub fn create_app() -> App {
    let mut app = App::new();

    let config = SceneConfig::default();
    let placements = Placements::scatter(
        ANIMAL_MODELS,
        config.placement_range,
        &mut rand::thread_rng(),
    );

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(SelectionPlugin)
        .add_plugins(TransformWidgetPlugin)
        .add_plugins(AnnotationPlugin);

    // Initialise resources early
    app.insert_resource(config)
        .insert_resource(placements)
        .init_resource::<LoadingProgress>()
        .init_resource::<BoundsFit>()
        .add_event::<FitRequest>();

    app.configure_sets(
        Update,
        (SceneSet::Input, SceneSet::Selection, SceneSet::Camera).chain(),
    );

    app.add_systems(Startup, (setup, spawn_items).chain())
        .add_systems(Update, resolve_model_sources.before(SceneSet::Input))
        .add_systems(
            Update,
            transition_to_running
                .after(resolve_model_sources)
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), fit_boundary_on_start);

    // Interaction only starts once the scene is up
    app.add_systems(
        Update,
        (
            hover_widget_handles,
            start_widget_drag,
            update_widget_drag,
            detect_item_pointer_events,
        )
            .chain()
            .in_set(SceneSet::Input)
            .run_if(in_state(AppState::Running)),
    )
    .add_systems(
        Update,
        (
            apply_item_pointer_events,
            sync_selected_flags,
            follow_selected_item,
            sync_widget_visibility,
            apply_item_highlight,
            update_hover_cursor,
        )
            .chain()
            .in_set(SceneSet::Selection)
            .run_if(in_state(AppState::Running)),
    );

    // Camera runs in every state so the view stays live while loading
    app.add_systems(
        Update,
        (
            orbit_controls_input,
            track_fit_view,
            observe_window_resize,
            apply_fit_requests,
            animate_fit,
            apply_orbit_camera,
            update_orientation_gizmo,
        )
            .chain()
            .in_set(SceneSet::Camera),
    );

    // Widget lines need this frame's propagated transforms
    app.add_systems(
        PostUpdate,
        draw_transform_widgets
            .after(TransformSystem::TransformPropagate)
            .run_if(in_state(AppState::Running)),
    );

    app
}

// Startup system that spawns everything except the items
fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    info!("Setting up island scene from `{}`", config.model_base_path);

    spawn_lighting(&mut commands);
    spawn_scene_camera(&mut commands);
    spawn_boundary_volume(&mut commands, &mut meshes);
    spawn_static_nodes(&mut commands, &asset_server, &config);

    if config.show_orientation_gizmo {
        spawn_orientation_gizmo(&mut commands, &mut meshes, &mut materials);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "wgpu=error,naga=warn,island_scene=info".into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
