use serde::{Deserialize, Serialize};

use crate::core::Grid;
use crate::core::consts::{DEFAULT_FOUR_PROBABILITY, DEFAULT_SIZE, DEFAULT_START_TILES, DEFAULT_WIN_VALUE};

/// A cell coordinate on the grid. Also used as a unit vector when stepping
/// across the grid, so it stays signed: a probe one step past the edge is a
/// valid, out of bounds position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub position: Position,
    pub value: u32,
    pub previous_position: Option<Position>,
    pub merged_from: Option<Box<[Tile; 2]>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserAction {
    Move(Direction),
    Restart,
}

/// What the render adapter receives next to the grid after every completed
/// move or restart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GameMetadata {
    pub score: u64,
    pub over: bool,
    pub won: bool,
    pub end: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub size: usize,
    pub start_tiles: usize,
    pub win_value: u32,
    /// Chance that a spawned tile is a 4 rather than a 2.
    pub four_probability: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            size: DEFAULT_SIZE,
            start_tiles: DEFAULT_START_TILES,
            win_value: DEFAULT_WIN_VALUE,
            four_probability: DEFAULT_FOUR_PROBABILITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveSummary {
    pub score_gained: u64,
    pub merges: usize,
    pub reached_win: bool,
}

pub enum GameUpdate {
    NextState(Grid, MoveSummary),
    NoChange,
}
