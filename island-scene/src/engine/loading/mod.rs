//! Model loading for the static nodes and items.
//!
//! Every `ModelSource` starts `Loading`; `resolve_model_sources` polls the
//! asset server and moves it to `Ready` (mesh, material and bounds inserted)
//! or `Failed` (node omitted, warning logged).

/// glTF resolution into mesh, standard material and local bounds.
pub mod model_loader;

/// Counters for settled model sources.
pub mod progress;
