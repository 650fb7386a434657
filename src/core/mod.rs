mod actuator;
mod consts;
mod error;
mod game_manager;
mod grid;
mod model_helpers;
mod models;
mod tile;
mod update;

pub use actuator::{Actuator, RecordingActuator};
pub use consts::*;
pub use error::GameError;
pub use game_manager::GameManager;
pub use grid::Grid;
pub use models::{Direction, GameMetadata, GameSettings, GameUpdate, MoveSummary, Position, Tile, UserAction};
pub use update::{build_traversals, find_farthest_position, step, FarthestPosition, Traversals};
