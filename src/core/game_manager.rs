use log::{debug, info, trace, warn};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::core::update::step;
use crate::core::{
    Actuator, Direction, GameError, GameMetadata, GameSettings, GameUpdate, Grid, Position, Tile,
    UserAction,
};

/// One game in progress. Owns the board and drives the actuator; every public
/// operation resolves completely before returning.
pub struct GameManager<R: Rng, A: Actuator> {
    settings: GameSettings,
    rng: R,
    actuator: A,
    grid: Grid,
    score: u64,
    over: bool,
    won: bool,
}

impl<R: Rng, A: Actuator> GameManager<R, A> {
    pub fn new(settings: GameSettings, rng: R, actuator: A) -> Result<Self, GameError> {
        settings.validate()?;
        let mut game = GameManager {
            settings,
            rng,
            actuator,
            grid: Grid::new(settings.size),
            score: 0,
            over: false,
            won: false,
        };
        game.init();
        Ok(game)
    }

    /// Start from a prepared board instead of random start tiles.
    pub fn with_grid(settings: GameSettings, grid: Grid, rng: R, actuator: A) -> Result<Self, GameError> {
        settings.validate()?;
        if grid.size() != settings.size {
            return Err(GameError::GridSizeMismatch {
                expected: settings.size,
                actual: grid.size(),
            });
        }
        let mut game = GameManager {
            settings,
            rng,
            actuator,
            grid,
            score: 0,
            over: false,
            won: false,
        };
        game.actuate();
        Ok(game)
    }

    fn init(&mut self) {
        self.grid = Grid::new(self.settings.size);
        self.score = 0;
        self.over = false;
        self.won = false;

        self.add_start_tiles();
        info!(
            "new {}x{} game with {} start tiles",
            self.settings.size,
            self.settings.size,
            self.grid.tile_count()
        );
        self.actuate();
    }

    fn add_start_tiles(&mut self) {
        for _ in 0..self.settings.start_tiles {
            self.add_random_tile();
        }
    }

    /// Returns whether the board changed. Ended games and moves that shift no
    /// tile leave everything untouched and do not actuate.
    pub fn handle_move(&mut self, direction: Direction) -> bool {
        if self.is_end() {
            return false;
        }

        let GameUpdate::NextState(grid, summary) = step(&self.grid, direction, self.settings.win_value) else {
            return false;
        };

        self.grid = grid;
        self.score += summary.score_gained;
        debug!(
            "move {:?}: +{} from {} merges, score {}",
            direction, summary.score_gained, summary.merges, self.score
        );
        if summary.reached_win {
            self.won = true;
            info!("reached {} with score {}", self.settings.win_value, self.score);
        }

        self.add_random_tile();

        if !self.can_continue() {
            self.over = true;
            info!("game over with score {}", self.score);
        }

        self.actuate();
        true
    }

    pub fn handle_move_code(&mut self, code: u8) -> Result<bool, GameError> {
        let direction = Direction::try_from(code)?;
        Ok(self.handle_move(direction))
    }

    pub fn handle_restart(&mut self) {
        self.actuator.continue_game();
        self.init();
    }

    pub fn handle_action(&mut self, action: UserAction) -> bool {
        match action {
            UserAction::Move(direction) => self.handle_move(direction),
            UserAction::Restart => {
                self.handle_restart();
                true
            }
        }
    }

    /// Drop a 2 or 4 on a random empty cell.
    pub fn add_random_tile(&mut self) -> Option<Position> {
        let empty_cells = self.grid.empty_cells();
        let Some(&position) = empty_cells.choose(&mut self.rng) else {
            warn!("no empty cell left for a new tile");
            return None;
        };
        let value = if self.rng.random_bool(self.settings.four_probability) { 4 } else { 2 };
        trace!("spawned {} at ({}, {})", value, position.x, position.y);
        self.grid.insert_tile(Tile::new(position, value));
        Some(position)
    }

    pub fn can_continue(&self) -> bool {
        self.can_move()
    }

    /// False only when the board is full and no two neighbours share a value.
    pub fn can_move(&self) -> bool {
        !self.grid.is_full() || self.grid.has_matching_neighbours()
    }

    pub fn is_end(&self) -> bool {
        self.over || self.won
    }

    pub fn metadata(&self) -> GameMetadata {
        GameMetadata {
            score: self.score,
            over: self.over,
            won: self.won,
            end: self.is_end(),
        }
    }

    fn actuate(&mut self) {
        let metadata = self.metadata();
        self.actuator.actuate(&self.grid, &metadata);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }
}
