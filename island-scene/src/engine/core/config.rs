use bevy::prelude::*;
use constants::path::RELATIVE_MODEL_PATH;
use constants::placement::PLACEMENT_RANGE;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Directory under the asset root holding `{name}.glb` files.
    pub model_base_path: String,
    pub show_orientation_gizmo: bool,
    /// Items are scattered over `[-range, range)` on both ground axes.
    pub placement_range: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_base_path: RELATIVE_MODEL_PATH.to_string(),
            show_orientation_gizmo: true,
            placement_range: PLACEMENT_RANGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_constants() {
        let config = SceneConfig::default();
        assert_eq!(config.model_base_path, RELATIVE_MODEL_PATH);
        assert!(config.show_orientation_gizmo);
        assert_eq!(config.placement_range, 20.0);
    }
}
