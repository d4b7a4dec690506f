// Grid: fixed-size tile storage with bounds-checked access

use crate::config::{GRID_COLS, GRID_ROWS};
use crate::entities::Entities;
use crate::error::SimError;
use crate::types::{Position, TileKind};

/// Tile layout for the arena.
///
/// Only occupancy changes during play; the wall pattern is fixed when the
/// grid is (re)generated.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: i32,
    rows: i32,
    tiles: Vec<TileKind>, // Row-major, index = y * cols + x
}

impl Grid {
    /// Creates a grid with the fixed border-and-pillar layout and no occupants
    pub fn new() -> Self {
        let mut grid = Grid {
            cols: GRID_COLS,
            rows: GRID_ROWS,
            tiles: vec![TileKind::Empty; (GRID_COLS * GRID_ROWS) as usize],
        };
        grid.lay_out();
        grid
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    /// Whether the fixed layout puts a wall at `pos`
    pub fn is_layout_wall(&self, pos: Position) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x == self.cols - 1
            || pos.y == self.rows - 1
            || (pos.x % 2 == 0 && pos.y % 2 == 0)
    }

    pub fn get(&self, pos: Position) -> Result<TileKind, SimError> {
        let index = self.index(pos)?;
        Ok(self.tiles[index])
    }

    pub fn set(&mut self, pos: Position, kind: TileKind) -> Result<(), SimError> {
        let index = self.index(pos)?;
        self.tiles[index] = kind;
        Ok(())
    }

    /// Rebuilds the wall/empty layout, then stamps the player and every
    /// living enemy onto their current cells.
    pub fn regenerate(&mut self, entities: &Entities) -> Result<(), SimError> {
        self.lay_out();
        if entities.player.alive {
            self.set(entities.player.position, TileKind::Player)?;
        }
        for enemy in entities.enemies.iter().filter(|e| e.alive) {
            self.set(enemy.position, TileKind::Enemy)?;
        }
        log::debug!(target: "sim", "Grid regenerated ({}x{})", self.cols, self.rows);
        Ok(())
    }

    /// Row-major view of every tile
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    fn lay_out(&mut self) {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let pos = Position::new(x, y);
                let kind = if self.is_layout_wall(pos) {
                    TileKind::Wall
                } else {
                    TileKind::Empty
                };
                self.tiles[(y * self.cols + x) as usize] = kind;
            }
        }
    }

    fn index(&self, pos: Position) -> Result<usize, SimError> {
        if !self.contains(pos) {
            return Err(SimError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok((pos.y * self.cols + pos.x) as usize)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
