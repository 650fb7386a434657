use crate::core::{Direction, GameUpdate, Grid, MoveSummary, Position, Tile};

pub struct Traversals {
    pub x_order: Vec<i32>,
    pub y_order: Vec<i32>,
}

pub struct FarthestPosition {
    pub farthest: Position,
    pub next: Position,
}

/// Visit order for a move: cells closest to the destination edge come first
/// so a sliding tile never runs over one that has not been processed yet.
pub fn build_traversals(size: usize, vector: Position) -> Traversals {
    let mut x_order: Vec<i32> = (0..size as i32).collect();
    let mut y_order: Vec<i32> = (0..size as i32).collect();
    if vector.x == 1 {
        x_order.reverse();
    }
    if vector.y == 1 {
        y_order.reverse();
    }
    Traversals { x_order, y_order }
}

/// Walk from `cell` along `vector` over empty cells. `farthest` is the last
/// empty cell reached (or `cell` itself), `next` the first cell beyond it that
/// is occupied or off the grid.
pub fn find_farthest_position(grid: &Grid, cell: Position, vector: Position) -> FarthestPosition {
    let mut previous = cell;
    let mut next = cell + vector;
    while grid.within_bound(&next) && !grid.is_occupied(&next) {
        previous = next;
        next = next + vector;
    }
    FarthestPosition {
        farthest: previous,
        next,
    }
}

/// Slide every tile towards `direction`, merging equal neighbours at most once
/// per tile. The input grid is left alone; a move that shifts nothing yields
/// `NoChange`.
pub fn step(grid: &Grid, direction: Direction, win_value: u32) -> GameUpdate {
    let vector = direction.vector();
    let traversals = build_traversals(grid.size(), vector);
    let mut new_grid = grid.clone();
    let mut summary = MoveSummary::default();
    let mut moved = false;

    new_grid.prepare_tiles();

    for &x in &traversals.x_order {
        for &y in &traversals.y_order {
            let cell = Position { x, y };
            let Some(mut tile) = new_grid.remove_tile(&cell) else {
                continue;
            };

            let positions = find_farthest_position(&new_grid, cell, vector);
            let merge_target = new_grid.take_tile_if(&positions.next, |next| {
                tile.merges_with(next) && next.merged_from.is_none()
            });

            let final_position = match merge_target {
                Some(next) => {
                    let merged = Tile::merged(tile, next);
                    summary.score_gained += merged.value as u64;
                    summary.merges += 1;
                    if merged.value == win_value {
                        summary.reached_win = true;
                    }
                    let position = merged.position;
                    new_grid.insert_tile(merged);
                    position
                }
                None => {
                    tile.update_position(positions.farthest);
                    new_grid.insert_tile(tile);
                    positions.farthest
                }
            };

            if final_position != cell {
                moved = true;
            }
        }
    }

    if moved {
        GameUpdate::NextState(new_grid, summary)
    } else {
        GameUpdate::NoChange
    }
}
