use bevy::prelude::*;

#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadingProgress {
    pub ready: usize,
    pub failed: usize,
    pub pending: usize,
}

impl LoadingProgress {
    pub fn all_settled(&self) -> bool {
        self.pending == 0 && (self.ready + self.failed) > 0
    }
}
