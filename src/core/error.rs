#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("direction code {0} is not one of 0 (up), 1 (right), 2 (down), 3 (left)")]
    InvalidDirection(u8),
    #[error("invalid game settings: {0}")]
    InvalidSettings(String),
    #[error("grid is {actual}x{actual} but the game expects {expected}x{expected}")]
    GridSizeMismatch { expected: usize, actual: usize },
    #[error("malformed grid text: {0}")]
    MalformedGrid(String),
}
