/// Base directory of the model files, relative to the asset root.
/// Overridable at build time through `ISLAND_SCENE_MODEL_PATH`.
pub const RELATIVE_MODEL_PATH: &str = match option_env!("ISLAND_SCENE_MODEL_PATH") {
    Some(path) => path,
    None => "models",
};

/// File extension of every model asset.
pub const MODEL_EXTENSION: &str = "glb";

pub const SKY_MODEL: &str = "Sky";
pub const OCEAN_MODEL: &str = "Ocean";
pub const ISLAND_MODEL: &str = "Island";
