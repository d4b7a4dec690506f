// Bomb timer service: active bombs, fuse countdown, detonation requests

use crate::config::{BOMB_FUSE_TICKS, FUSE_CRITICAL_BELOW, FUSE_WARNING_BELOW};
use crate::debug_bomb;
use crate::error::SimError;
use crate::grid::Grid;
use crate::types::{Position, TileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bomb {
    pub position: Position,
    pub countdown: u32, // Ticks until detonation
}

/// How close a bomb is to going off. Renderers map this to a blink rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuseStage {
    Steady,
    Warning,
    Critical,
}

impl FuseStage {
    pub fn from_countdown(countdown: u32) -> Self {
        if countdown < FUSE_CRITICAL_BELOW {
            FuseStage::Critical
        } else if countdown < FUSE_WARNING_BELOW {
            FuseStage::Warning
        } else {
            FuseStage::Steady
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BombTimers {
    bombs: Vec<Bomb>, // Creation order
}

impl BombTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a bomb with a full fuse at `pos` and stamps the cell.
    /// Returns `false` without touching anything if a bomb is already there.
    pub fn place(&mut self, pos: Position, grid: &mut Grid) -> Result<bool, SimError> {
        self.arm(pos, BOMB_FUSE_TICKS, grid)
    }

    pub(crate) fn arm(&mut self, pos: Position, fuse: u32, grid: &mut Grid) -> Result<bool, SimError> {
        if self.contains(pos) {
            return Ok(false);
        }
        grid.set(pos, TileKind::Bomb)?;
        self.bombs.push(Bomb {
            position: pos,
            countdown: fuse,
        });
        debug_bomb!("Bomb armed at {} with {} tick fuse", pos, fuse);
        Ok(true)
    }

    /// Advances every fuse by one tick. Bombs that run out are removed and
    /// their positions returned in the order they were placed.
    pub fn tick(&mut self) -> Vec<Position> {
        let mut fired = Vec::new();
        self.bombs.retain_mut(|bomb| {
            bomb.countdown = bomb.countdown.saturating_sub(1);
            if bomb.countdown == 0 {
                fired.push(bomb.position);
                false
            } else {
                true
            }
        });
        for pos in &fired {
            debug_bomb!("Fuse expired at {}", pos);
        }
        fired
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.bombs.iter().any(|b| b.position == pos)
    }

    pub fn countdown_at(&self, pos: Position) -> Option<u32> {
        self.bombs
            .iter()
            .find(|b| b.position == pos)
            .map(|b| b.countdown)
    }

    pub fn len(&self) -> usize {
        self.bombs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bombs.is_empty()
    }
}
