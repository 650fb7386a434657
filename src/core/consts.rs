pub const DEFAULT_SIZE: usize = 4;
pub const DEFAULT_START_TILES: usize = 2;
pub const DEFAULT_WIN_VALUE: u32 = 2048;
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Largest board edge accepted by settings validation.
pub const MAX_SIZE: usize = 1024;
/// Highest tile value. Tiles at this value no longer merge, so doubling
/// always fits in a `u32`.
pub const MAX_TILE_VALUE: u32 = 1 << 30;
