use std::io::Write;

use log::error;
use serde::Serialize;

use crate::core::{Actuator, GameError, GameMetadata, Grid, MAX_TILE_VALUE, Position, Tile};
use crate::models::GameMessage;

/// Read a board written one row per line, cells separated by whitespace,
/// `.` for an empty cell. Tiles must be powers of two from 2 to
/// `MAX_TILE_VALUE`.
pub fn parse_grid(s: &str) -> Result<Grid, GameError> {
    let rows: Vec<Vec<&str>> = s
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split_whitespace().collect())
        .collect();

    let size = rows.len();
    let mut grid = Grid::new(size);
    for (y, row) in rows.iter().enumerate() {
        if row.len() != size {
            return Err(GameError::MalformedGrid(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                size
            )));
        }
        for (x, token) in row.iter().enumerate() {
            if *token == "." {
                continue;
            }
            let value: u32 = token
                .parse()
                .ok()
                .filter(|&v: &u32| v >= 2 && v.is_power_of_two() && v <= MAX_TILE_VALUE)
                .ok_or_else(|| GameError::MalformedGrid(format!("bad cell {:?} at ({}, {})", token, x, y)))?;
            grid.insert_tile(Tile::new(Position::new(x as i32, y as i32), value));
        }
    }
    Ok(grid)
}

pub fn render_grid_to_string(grid: &Grid) -> String {
    let size = grid.size() as i32;
    let mut result = String::new();
    for y in 0..size {
        let row: Vec<String> = (0..size)
            .map(|x| match grid.cell_content(&Position { x, y }) {
                Some(tile) => tile.value.to_string(),
                None => ".".to_string(),
            })
            .collect();
        result.push_str(&row.join(" "));
        result.push('\n');
    }
    result
}

pub fn status_line(metadata: &GameMetadata) -> String {
    match GameMessage::from_metadata(metadata) {
        Some(message) => format!("score: {} | {}", metadata.score, message.text()),
        None => format!("score: {}", metadata.score),
    }
}

/// Writes each frame as a text board followed by a status line.
pub struct TextActuator<W: Write> {
    out: W,
}

impl<W: Write> TextActuator<W> {
    pub fn new(out: W) -> Self {
        TextActuator { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Actuator for TextActuator<W> {
    fn actuate(&mut self, grid: &Grid, metadata: &GameMetadata) {
        let frame = format!("{}{}\n\n", render_grid_to_string(grid), status_line(metadata));
        if let Err(err) = self.out.write_all(frame.as_bytes()) {
            error!("failed to write text frame: {}", err);
        }
    }
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    grid: &'a Grid,
    metadata: &'a GameMetadata,
}

/// Writes each frame as one JSON object per line.
pub struct JsonLinesActuator<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesActuator<W> {
    pub fn new(out: W) -> Self {
        JsonLinesActuator { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Actuator for JsonLinesActuator<W> {
    fn actuate(&mut self, grid: &Grid, metadata: &GameMetadata) {
        let written = serde_json::to_writer(&mut self.out, &JsonFrame { grid, metadata })
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(err) = written {
            error!("failed to write json frame: {}", err);
        }
    }
}
