use crate::core::{GameMetadata, Grid};

/// Receives the board after every completed move or restart.
pub trait Actuator {
    fn actuate(&mut self, grid: &Grid, metadata: &GameMetadata);

    /// Called when a restart begins, before the fresh board is actuated.
    fn continue_game(&mut self) {}
}

/// Keeps a copy of every frame it is handed.
#[derive(Default, Debug)]
pub struct RecordingActuator {
    pub frames: Vec<(Grid, GameMetadata)>,
    pub continue_calls: usize,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&(Grid, GameMetadata)> {
        self.frames.last()
    }
}

impl Actuator for RecordingActuator {
    fn actuate(&mut self, grid: &Grid, metadata: &GameMetadata) {
        self.frames.push((grid.clone(), *metadata));
    }

    fn continue_game(&mut self) {
        self.continue_calls += 1;
    }
}
