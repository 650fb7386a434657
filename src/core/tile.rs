use crate::core::{MAX_TILE_VALUE, Position, Tile};

impl Tile {
    pub fn new(position: Position, value: u32) -> Tile {
        Tile {
            position,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Equal values below `MAX_TILE_VALUE` combine.
    pub fn merges_with(&self, other: &Tile) -> bool {
        self.value == other.value && self.value < MAX_TILE_VALUE
    }

    /// Combine `moving` into `target`. The result sits where `target` was and
    /// keeps both sources for one render pass. Only call this for tiles that
    /// pass `merges_with`.
    pub fn merged(mut moving: Tile, target: Tile) -> Tile {
        let position = target.position;
        moving.update_position(position);
        Tile {
            position,
            value: target.value * 2,
            previous_position: None,
            merged_from: Some(Box::new([moving, target])),
        }
    }

    pub fn save_position(&mut self) {
        self.previous_position = Some(self.position);
    }

    pub fn update_position(&mut self, position: Position) {
        self.position = position;
    }
}
