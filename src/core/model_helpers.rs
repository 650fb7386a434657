use std::ops::Add;

use crate::core::{Direction, GameError, GameSettings, MAX_SIZE, MAX_TILE_VALUE, Position, UserAction};

impl Position {
    pub const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Direction {
    /// In wire-code order: 0 up, 1 right, 2 down, 3 left.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn vector(self) -> Position {
        match self {
            Direction::Up => Position { x: 0, y: -1 },
            Direction::Right => Position { x: 1, y: 0 },
            Direction::Down => Position { x: 0, y: 1 },
            Direction::Left => Position { x: -1, y: 0 },
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Map a drag from its start to its end point onto a direction. Drags no
    /// longer than `threshold` on both axes are ignored.
    pub fn from_swipe(dx: i32, dy: i32, threshold: i32) -> Option<Direction> {
        let abs_dx = dx.abs();
        let abs_dy = dy.abs();
        if abs_dx.max(abs_dy) <= threshold {
            return None;
        }
        Some(if abs_dx > abs_dy {
            if dx > 0 { Direction::Right } else { Direction::Left }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

impl TryFrom<u8> for Direction {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(code as usize)
            .copied()
            .ok_or(GameError::InvalidDirection(code))
    }
}

impl UserAction {
    pub fn all_actions() -> Vec<UserAction> {
        vec![
            UserAction::Move(Direction::Up),
            UserAction::Move(Direction::Right),
            UserAction::Move(Direction::Down),
            UserAction::Move(Direction::Left),
            UserAction::Restart,
        ]
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.size == 0 {
            return Err(GameError::InvalidSettings("size must be at least 1".to_string()));
        }
        if self.size > MAX_SIZE {
            return Err(GameError::InvalidSettings(format!(
                "size {} exceeds the maximum of {}",
                self.size, MAX_SIZE
            )));
        }
        let cell_count = self
            .size
            .checked_mul(self.size)
            .ok_or_else(|| GameError::InvalidSettings(format!("size {} is too large", self.size)))?;
        if self.start_tiles > cell_count {
            return Err(GameError::InvalidSettings(format!(
                "{} start tiles do not fit on a {}x{} grid",
                self.start_tiles, self.size, self.size
            )));
        }
        if self.win_value < 4 || !self.win_value.is_power_of_two() || self.win_value > MAX_TILE_VALUE {
            return Err(GameError::InvalidSettings(format!(
                "win value {} is not a power of two between 4 and {}",
                self.win_value, MAX_TILE_VALUE
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(GameError::InvalidSettings(format!(
                "four probability {} is outside 0..=1",
                self.four_probability
            )));
        }
        Ok(())
    }
}
