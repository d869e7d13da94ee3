use bevy::pbr::NotShadowReceiver;
use bevy::prelude::*;
use constants::render_settings::FOLLOW_POLAR_ANGLE;

use crate::engine::assets::model_source::{ModelLoadState, ModelSource};
use crate::engine::assets::placement::{PlacementRecord, Placements};
use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::core::config::SceneConfig;
use crate::tools::annotation::spawn_annotation;
use crate::tools::selection::state::{Item, ItemPivot, ItemState, SelectionStore};
use crate::tools::transform_widget::TransformWidget;

/// Spawn one item per placement record.
pub fn spawn_items(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    placements: Res<Placements>,
    config: Res<SceneConfig>,
) {
    for (index, record) in placements.records.iter().enumerate() {
        let source = ModelSource::load(&asset_server, &config.model_base_path, &record.name);
        spawn_item(&mut commands, index, record, source);
    }
    info!("Placed {} items", placements.len());
}

/// Pivot carrying the placement translation, with the model and its widget
/// as children. Returns the model entity, which is the selection key.
pub fn spawn_item(
    commands: &mut Commands,
    index: usize,
    record: &PlacementRecord,
    source: ModelSource,
) -> Entity {
    let pivot = commands
        .spawn((
            ItemPivot,
            record.pivot_transform(),
            Visibility::default(),
            Name::new(format!("{}Pivot", record.name)),
        ))
        .id();

    let item = commands
        .spawn((
            Item {
                index,
                name: record.name.clone(),
                pivot,
                heading: record.rotate_y,
            },
            ItemState::default(),
            source,
            ModelLoadState::Loading,
            record.model_transform(),
            Visibility::default(),
            NotShadowReceiver,
            Name::new(record.name.clone()),
            ChildOf(pivot),
        ))
        .id();

    commands.spawn((
        TransformWidget::new(item),
        Transform::from_rotation(Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2)),
        Visibility::Hidden,
        Name::new(format!("{}Widget", record.name)),
        ChildOf(pivot),
    ));

    spawn_annotation(commands, item, &record.name);
    item
}

/// Lock the orbit onto the selected item's heading, or release it when
/// nothing is selected. Runs every frame and is idempotent.
pub fn follow_selected_item(
    selection: Res<SelectionStore>,
    controls: Option<ResMut<OrbitControls>>,
    items: Query<&Item>,
) {
    let Some(mut controls) = controls else { return };

    match selection.get_selected() {
        Some(selected) => {
            controls.enabled = false;
            if let Ok(item) = items.get(selected) {
                controls.set_azimuthal_angle(item.heading);
            }
            controls.set_polar_angle(FOLLOW_POLAR_ANGLE);
        }
        None => controls.enabled = true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::bounds_fit::FitRequest;
    use crate::tools::selection::interactions::{
        ItemPointerEvent, apply_item_pointer_events, sync_selected_flags,
    };
    use constants::placement::{ANIMAL_MODELS, PLACEMENT_RANGE};
    use constants::render_settings::ORBIT_MAX_POLAR_ANGLE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Resource, Default)]
    struct Spawned(Vec<Entity>);

    fn spawn_without_assets(
        mut commands: Commands,
        placements: Res<Placements>,
        mut spawned: ResMut<Spawned>,
    ) {
        for (index, record) in placements.records.iter().enumerate() {
            let source = ModelSource {
                name: record.name.clone(),
                path: record.name.clone(),
                handle: Handle::default(),
            };
            spawned.0.push(spawn_item(&mut commands, index, record, source));
        }
    }

    fn scene_app() -> App {
        let mut rng = StdRng::seed_from_u64(3);
        let mut app = App::new();
        app.add_event::<ItemPointerEvent>()
            .add_event::<FitRequest>()
            .init_resource::<SelectionStore>()
            .init_resource::<Spawned>()
            .insert_resource(Placements::scatter(ANIMAL_MODELS, PLACEMENT_RANGE, &mut rng))
            .insert_resource(OrbitControls::default())
            .add_systems(Startup, spawn_without_assets)
            .add_systems(
                Update,
                (apply_item_pointer_events, sync_selected_flags, follow_selected_item).chain(),
            );
        app.update();
        app
    }

    fn items(app: &App) -> Vec<Entity> {
        app.world().resource::<Spawned>().0.clone()
    }

    #[test]
    fn eight_records_spawn_eight_unselected_items() {
        let mut app = scene_app();
        let items = items(&app);
        assert_eq!(items.len(), 8);

        let mut query = app.world_mut().query::<(&Item, &ItemState)>();
        let states: Vec<_> = query.iter(app.world()).collect();
        assert_eq!(states.len(), 8);
        assert!(states.iter().all(|(_, state)| !state.selected));
        assert!(app.world().resource::<OrbitControls>().enabled);
    }

    #[test]
    fn item_heading_matches_record() {
        let app = scene_app();
        let items = items(&app);
        let placements = app.world().resource::<Placements>();
        let third = &placements.records[3];

        let item = app.world().get::<Item>(items[3]).unwrap();
        assert_eq!(item.heading, third.rotate_y);

        let transform = app.world().get::<Transform>(items[3]).unwrap();
        assert_eq!(transform.rotation, Quat::from_rotation_y(third.rotate_y));

        let pivot = item.pivot;
        let pivot_transform = app.world().get::<Transform>(pivot).unwrap();
        assert_eq!(
            pivot_transform.translation,
            Vec3::new(third.position.z, third.position.y, third.position.x)
        );
    }

    #[test]
    fn click_item_three_locks_orbit_and_fits_it() {
        let mut app = scene_app();
        let third = items(&app)[3];
        let mut fits = app.world().resource::<Events<FitRequest>>().get_cursor();

        app.world_mut().send_event(ItemPointerEvent::Click(third));
        app.update();

        let store = app.world().resource::<SelectionStore>();
        assert_eq!(store.get_selected(), Some(third));

        let controls = app.world().resource::<OrbitControls>();
        assert!(!controls.enabled);
        assert_eq!(controls.polar_angle(), ORBIT_MAX_POLAR_ANGLE);

        let heading = app.world().resource::<Placements>().records[3].rotate_y;
        assert_eq!(controls.azimuthal_angle(), heading);

        let events = app.world().resource::<Events<FitRequest>>();
        let emitted: Vec<_> = fits.read(events).copied().collect();
        assert_eq!(emitted, vec![FitRequest::Object(third)]);
    }

    #[test]
    fn miss_releases_orbit_and_fits_boundary() {
        let mut app = scene_app();
        let third = items(&app)[3];
        app.world_mut().send_event(ItemPointerEvent::Click(third));
        app.update();

        let mut fits = app.world().resource::<Events<FitRequest>>().get_cursor();
        app.world_mut().send_event(ItemPointerEvent::Miss(MouseButton::Left));
        app.update();

        assert_eq!(app.world().resource::<SelectionStore>().get_selected(), None);
        assert!(app.world().resource::<OrbitControls>().enabled);
        let events = app.world().resource::<Events<FitRequest>>();
        let emitted: Vec<_> = fits.read(events).copied().collect();
        assert_eq!(emitted, vec![FitRequest::Boundary]);
    }

    #[test]
    fn azimuth_keeps_headings_past_half_turn() {
        let mut app = App::new();
        app.add_event::<ItemPointerEvent>()
            .add_event::<FitRequest>()
            .init_resource::<SelectionStore>()
            .init_resource::<Spawned>()
            .insert_resource(Placements {
                records: vec![PlacementRecord {
                    name: "Chameleon".into(),
                    position: Vec3::new(1.0, 0.0, -2.0),
                    rotate_y: 4.0,
                }],
            })
            .insert_resource(OrbitControls::default())
            .add_systems(Startup, spawn_without_assets)
            .add_systems(
                Update,
                (apply_item_pointer_events, sync_selected_flags, follow_selected_item).chain(),
            );
        app.update();

        let item = items(&app)[0];
        app.world_mut().send_event(ItemPointerEvent::Click(item));
        app.update();

        let controls = app.world().resource::<OrbitControls>();
        assert!(!controls.enabled);
        assert_eq!(controls.azimuthal_angle(), 4.0);
    }

    #[test]
    fn follow_tick_is_idempotent() {
        let mut app = scene_app();
        let first = items(&app)[0];
        app.world_mut().send_event(ItemPointerEvent::Click(first));
        app.update();

        let before = app.world().resource::<OrbitControls>().clone();
        app.update();
        app.update();
        let after = app.world().resource::<OrbitControls>();
        assert_eq!(before.enabled, after.enabled);
        assert_eq!(before.azimuthal_angle(), after.azimuthal_angle());
        assert_eq!(before.polar_angle(), after.polar_angle());
    }

    #[test]
    fn follow_tick_without_controls_is_a_no_op() {
        let mut app = App::new();
        app.init_resource::<SelectionStore>()
            .add_systems(Update, follow_selected_item);
        app.update();
        assert!(!app.world().contains_resource::<OrbitControls>());
    }
}
