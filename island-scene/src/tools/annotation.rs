use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy::ui::UiSystem;

use crate::engine::assets::bounds::ModelBounds;
use crate::engine::camera::SceneCamera;
use crate::engine::core::app_state::AppState;
use crate::tools::selection::ray::ray_hits_obb;
use crate::tools::selection::state::{Item, ItemState};
use crate::tools::transform_widget::WIDGET_ANCHOR;

/// Screen-space label naming an item, pinned to its widget origin.
#[derive(Component, Debug, Clone, Copy)]
pub struct ItemAnnotation {
    pub item: Entity,
}

/// Labels read this frame's propagated transforms and must be positioned
/// before the UI lays them out.
pub struct AnnotationPlugin;

impl Plugin for AnnotationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            update_annotations
                .after(TransformSystem::TransformPropagate)
                .before(UiSystem::Layout)
                .run_if(in_state(AppState::Running)),
        );
    }
}

pub fn spawn_annotation(commands: &mut Commands, item: Entity, label: &str) {
    commands.spawn((
        Text::new(label),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::WHITE),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        Node {
            position_type: PositionType::Absolute,
            padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
            ..default()
        },
        Visibility::Hidden,
        ItemAnnotation { item },
        Name::new(format!("{label}Annotation")),
    ));
}

/// True when any of `others` sits between the camera and `anchor`.
pub fn is_occluded<'a>(
    camera_position: Vec3,
    anchor: Vec3,
    others: impl IntoIterator<Item = (&'a GlobalTransform, &'a ModelBounds)>,
) -> bool {
    let offset = anchor - camera_position;
    let distance = offset.length();
    if distance <= f32::EPSILON {
        return false;
    }
    let dir = offset / distance;
    others
        .into_iter()
        .filter_map(|(xf, bounds)| ray_hits_obb(camera_position, dir, xf, bounds))
        .any(|t| t < distance * 0.999)
}

/// Place each label over its item's widget origin; shown only while the
/// item is selected and the anchor is in view.
pub fn update_annotations(
    cameras: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    items: Query<(Entity, &ItemState, &ModelBounds, &GlobalTransform), With<Item>>,
    mut labels: Query<(&ItemAnnotation, &mut Node, &mut Visibility)>,
) {
    let camera = cameras.single().ok();

    for (annotation, mut node, mut visibility) in &mut labels {
        let position = (|| {
            let (camera, camera_xf) = camera?;
            let (entity, state, bounds, item_xf) = items.get(annotation.item).ok()?;
            if !state.selected {
                return None;
            }
            let anchor = bounds.to_world(item_xf).anchor_point(WIDGET_ANCHOR);
            let others = items
                .iter()
                .filter(|(other, ..)| *other != entity)
                .map(|(_, _, bounds, xf)| (xf, bounds));
            if is_occluded(camera_xf.translation(), anchor, others) {
                return None;
            }
            camera.world_to_viewport(camera_xf, anchor).ok()
        })();

        let wanted = match position {
            Some(position) => {
                node.left = Val::Px(position.x);
                node.top = Val::Px(position.y);
                Visibility::Inherited
            }
            None => Visibility::Hidden,
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}
