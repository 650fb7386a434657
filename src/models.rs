use crate::core::{GameMetadata, Grid, Tile};

pub struct GameRenderState {
    pub grid: Grid,
    pub metadata: GameMetadata,
    pub score_addition: Option<u64>,
    pub message: Option<GameMessage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMessage {
    Won,
    Over,
}

impl GameMessage {
    pub fn from_metadata(metadata: &GameMetadata) -> Option<GameMessage> {
        if !metadata.end {
            None
        } else if metadata.over {
            Some(GameMessage::Over)
        } else if metadata.won {
            Some(GameMessage::Won)
        } else {
            None
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            GameMessage::Won => "You win!",
            GameMessage::Over => "Game over!",
        }
    }
}

/// How a tile arrived in its cell during the last move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileAppearance {
    New,
    Moved,
    Merged,
}

impl TileAppearance {
    pub fn of(tile: &Tile) -> TileAppearance {
        if tile.previous_position.is_some() {
            TileAppearance::Moved
        } else if tile.merged_from.is_some() {
            TileAppearance::Merged
        } else {
            TileAppearance::New
        }
    }
}
