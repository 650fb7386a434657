use serde::Serialize;

use crate::core::{Position, Tile};

/// Square board of `size * size` cells, each empty or holding one tile whose
/// `position` matches the cell it sits in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn within_bound(&self, pos: &Position) -> bool {
        let size = self.size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Out of bounds positions are simply empty.
    pub fn cell_content(&self, pos: &Position) -> Option<&Tile> {
        if !self.within_bound(pos) {
            return None;
        }
        self[pos].as_ref()
    }

    pub fn is_occupied(&self, pos: &Position) -> bool {
        self.cell_content(pos).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Unoccupied cells, x outer and y inner.
    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions().filter(|pos| self[pos].is_none()).collect()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size as i32;
        (0..size).flat_map(move |x| (0..size).map(move |y| Position { x, y }))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn highest_value(&self) -> Option<u32> {
        self.tiles().map(|tile| tile.value).max()
    }

    /// Place `tile` at its own position, returning whatever was there.
    ///
    /// # Panics
    ///
    /// If the tile's position is outside the grid. Use `within_bound` first
    /// when the position is not already known to be valid.
    pub fn insert_tile(&mut self, tile: Tile) -> Option<Tile> {
        assert!(self.within_bound(&tile.position), "tile placed outside the grid");
        let pos = tile.position;
        self[&pos].replace(tile)
    }

    pub fn remove_tile(&mut self, pos: &Position) -> Option<Tile> {
        if !self.within_bound(pos) {
            return None;
        }
        self[pos].take()
    }

    /// Remove and return the tile at `pos` only if `predicate` accepts it.
    pub fn take_tile_if<F>(&mut self, pos: &Position, predicate: F) -> Option<Tile>
    where
        F: FnOnce(&Tile) -> bool,
    {
        if !self.within_bound(pos) {
            return None;
        }
        self[pos].take_if(|tile| predicate(tile))
    }

    /// Clear merge provenance and remember where every tile starts this move.
    pub fn prepare_tiles(&mut self) {
        for tile in self.cells.iter_mut().flatten() {
            tile.merged_from = None;
            tile.save_position();
        }
    }

    /// Whether any two 4-neighbouring tiles could merge.
    pub fn has_matching_neighbours(&self) -> bool {
        const FORWARD: [Position; 2] = [Position { x: 1, y: 0 }, Position { x: 0, y: 1 }];
        self.tiles().any(|tile| {
            FORWARD.iter().any(|&step| {
                self.cell_content(&(tile.position + step))
                    .is_some_and(|neighbour| neighbour.merges_with(tile))
            })
        })
    }

    fn cell_index(&self, pos: &Position) -> usize {
        pos.x as usize * self.size + pos.y as usize
    }
}

impl std::ops::Index<&Position> for Grid {
    type Output = Option<Tile>;

    fn index(&self, index: &Position) -> &Self::Output {
        &self.cells[self.cell_index(index)]
    }
}

impl std::ops::IndexMut<&Position> for Grid {
    fn index_mut(&mut self, index: &Position) -> &mut Self::Output {
        let cell = self.cell_index(index);
        &mut self.cells[cell]
    }
}
