//! Read-only grid snapshot handed to renderers.
//!
//! Also renders as plain text for headless runs and log output.

use std::fmt;

use crate::grid::Grid;
use crate::types::{Position, TileKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub cols: i32,
    pub rows: i32,
    pub tiles: Vec<TileKind>, // Row-major
}

impl GridSnapshot {
    pub fn capture(grid: &Grid) -> Self {
        GridSnapshot {
            cols: grid.cols(),
            rows: grid.rows(),
            tiles: grid.tiles().to_vec(),
        }
    }

    pub fn get(&self, pos: Position) -> Option<TileKind> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.cols || pos.y >= self.rows {
            return None;
        }
        self.tiles.get((pos.y * self.cols + pos.x) as usize).copied()
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.cols as usize) {
            let line: String = row.iter().map(|t| t.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
