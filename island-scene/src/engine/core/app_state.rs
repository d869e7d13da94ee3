use bevy::prelude::*;

use crate::engine::camera::bounds_fit::FitRequest;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

// Leave Loading once every model source is either ready or failed
pub fn transition_to_running(
    progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if progress.all_settled() {
        info!(
            "→ Models settled ({} ready, {} failed), transitioning to Running",
            progress.ready, progress.failed
        );
        next_state.set(AppState::Running);
    }
}

/// Frame the whole island once the scene is up.
pub fn fit_boundary_on_start(mut requests: EventWriter<FitRequest>) {
    requests.write(FitRequest::Boundary);
}
