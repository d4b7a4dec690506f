// Explosion service: blast footprint, damage, and blast-cell lifetimes

use crate::bombs::BombTimers;
use crate::config::EXPLOSION_TICKS;
use crate::entities::Entities;
use crate::error::SimError;
use crate::grid::Grid;
use crate::types::{Position, TileKind};
use crate::{debug_blast, debug_enemy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explosion {
    pub position: Position,
    pub countdown: u32,
    ignited_this_tick: bool, // Skips the first aging pass after (re)ignition
}

#[derive(Debug, Clone, Default)]
pub struct Explosions {
    active: Vec<Explosion>, // At most one record per position
}

impl Explosions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detonates a bomb at `origin`.
    ///
    /// The footprint is the origin and its four orthogonal neighbours. Cells
    /// outside the grid and walls are skipped. Every other cell kills whoever
    /// stands there, turns into `explosion`, and gets a full-duration timer
    /// (refreshing an existing one rather than adding a second).
    ///
    /// Returns the cells that were ignited.
    pub fn detonate(
        &mut self,
        origin: Position,
        grid: &mut Grid,
        entities: &mut Entities,
    ) -> Result<Vec<Position>, SimError> {
        let mut ignited = Vec::with_capacity(5);

        for cell in origin.cross() {
            if !grid.contains(cell) || grid.get(cell)? == TileKind::Wall {
                continue;
            }

            while let Some(enemy) = entities.enemy_at_mut(cell) {
                enemy.alive = false;
                debug_enemy!("Enemy {} caught in blast at {}", enemy.id, cell);
            }
            if entities.player_at(cell) {
                entities.player.alive = false;
                debug_blast!("Player caught in blast at {}", cell);
            }

            grid.set(cell, TileKind::Explosion)?;
            match self.active.iter_mut().find(|e| e.position == cell) {
                Some(existing) => {
                    existing.countdown = EXPLOSION_TICKS;
                    existing.ignited_this_tick = true;
                }
                None => self.active.push(Explosion {
                    position: cell,
                    countdown: EXPLOSION_TICKS,
                    ignited_this_tick: true,
                }),
            }
            ignited.push(cell);
        }

        debug_blast!("Detonation at {} ignited {} cells", origin, ignited.len());
        Ok(ignited)
    }

    /// Ages every blast cell that was not ignited during this tick.
    ///
    /// Expired cells are cleared only if the grid still shows `explosion`
    /// there. A cleared cell falls back to `bomb` when an undetonated bomb
    /// still sits under it, otherwise to `empty`.
    pub fn tick(&mut self, grid: &mut Grid, bombs: &BombTimers) -> Result<(), SimError> {
        let mut expired = Vec::new();
        self.active.retain_mut(|explosion| {
            if explosion.ignited_this_tick {
                explosion.ignited_this_tick = false;
                return true;
            }
            explosion.countdown = explosion.countdown.saturating_sub(1);
            if explosion.countdown == 0 {
                expired.push(explosion.position);
                false
            } else {
                true
            }
        });

        for pos in expired {
            if grid.get(pos)? == TileKind::Explosion {
                let revert = if bombs.contains(pos) {
                    TileKind::Bomb
                } else {
                    TileKind::Empty
                };
                grid.set(pos, revert)?;
            }
            debug_blast!("Blast cleared at {}", pos);
        }
        Ok(())
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.active.iter().any(|e| e.position == pos)
    }

    pub fn countdown_at(&self, pos: Position) -> Option<u32> {
        self.active
            .iter()
            .find(|e| e.position == pos)
            .map(|e| e.countdown)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn setup() -> (Grid, Entities) {
        let entities = Entities::spawn(Position::new(1, 1), &[Position::new(13, 13)]);
        let mut grid = Grid::new();
        grid.regenerate(&entities).unwrap();
        (grid, entities)
    }

    #[test]
    fn test_footprint_open_cell() {
        let (mut grid, mut entities) = setup();
        let mut explosions = Explosions::new();
        // (5,5) sits between pillars: row 5 and column 5 are open
        let ignited = explosions
            .detonate(Position::new(5, 5), &mut grid, &mut entities)
            .unwrap();
        let expected: HashSet<Position> = [(5, 5), (6, 5), (4, 5), (5, 6), (5, 4)]
            .into_iter()
            .map(Position::from)
            .collect();
        assert_eq!(ignited.into_iter().collect::<HashSet<_>>(), expected);
        for pos in &expected {
            assert_eq!(grid.get(*pos).unwrap(), TileKind::Explosion);
        }
        assert_eq!(explosions.len(), 5);
    }

    #[test]
    fn test_walls_block_and_survive() {
        let (mut grid, mut entities) = setup();
        let mut explosions = Explosions::new();
        // (3,2): left/right neighbours (2,2) and (4,2) are pillars
        let ignited = explosions
            .detonate(Position::new(3, 2), &mut grid, &mut entities)
            .unwrap();
        assert_eq!(ignited.len(), 3);
        assert_eq!(grid.get(Position::new(2, 2)).unwrap(), TileKind::Wall);
        assert_eq!(grid.get(Position::new(4, 2)).unwrap(), TileKind::Wall);
        assert!(!explosions.contains(Position::new(2, 2)));
    }

    #[test]
    fn test_corner_blast_stays_in_bounds() {
        let (mut grid, mut entities) = setup();
        let mut explosions = Explosions::new();
        let ignited = explosions
            .detonate(Position::new(1, 1), &mut grid, &mut entities)
            .unwrap();
        assert_eq!(ignited.len(), 3);
        assert!(!entities.player.alive);
    }

    #[test]
    fn test_blast_kills_enemy() {
        let (mut grid, mut entities) = setup();
        let mut explosions = Explosions::new();
        explosions
            .detonate(Position::new(12, 13), &mut grid, &mut entities)
            .unwrap();
        assert!(!entities.enemies[0].alive);
        assert!(entities.player.alive);
        assert_eq!(grid.get(Position::new(13, 13)).unwrap(), TileKind::Explosion);
    }

    #[test]
    fn test_duration_and_revert() {
        let (mut grid, mut entities) = setup();
        let bombs = BombTimers::new();
        let mut explosions = Explosions::new();
        let pos = Position::new(5, 5);
        explosions.detonate(pos, &mut grid, &mut entities).unwrap();
        // Same-tick aging pass leaves the full duration in place
        explosions.tick(&mut grid, &bombs).unwrap();
        assert_eq!(explosions.countdown_at(pos), Some(EXPLOSION_TICKS));

        for _ in 0..EXPLOSION_TICKS - 1 {
            explosions.tick(&mut grid, &bombs).unwrap();
        }
        assert_eq!(explosions.countdown_at(pos), Some(1));
        assert_eq!(grid.get(pos).unwrap(), TileKind::Explosion);

        explosions.tick(&mut grid, &bombs).unwrap();
        assert!(explosions.is_empty());
        assert_eq!(grid.get(pos).unwrap(), TileKind::Empty);
    }

    #[test]
    fn test_overlap_refreshes_instead_of_duplicating() {
        let (mut grid, mut entities) = setup();
        let bombs = BombTimers::new();
        let mut explosions = Explosions::new();
        let shared = Position::new(5, 5);
        explosions.detonate(Position::new(5, 5), &mut grid, &mut entities).unwrap();
        explosions.tick(&mut grid, &bombs).unwrap();
        for _ in 0..5 {
            explosions.tick(&mut grid, &bombs).unwrap();
        }
        assert_eq!(explosions.countdown_at(shared), Some(EXPLOSION_TICKS - 5));

        explosions.detonate(Position::new(5, 4), &mut grid, &mut entities).unwrap();
        assert_eq!(explosions.countdown_at(shared), Some(EXPLOSION_TICKS));
        assert_eq!(
            explosions.active.iter().filter(|e| e.position == shared).count(),
            1
        );
    }

    #[test]
    fn test_revert_guard_leaves_reoccupied_cell() {
        let (mut grid, mut entities) = setup();
        let bombs = BombTimers::new();
        let mut explosions = Explosions::new();
        let pos = Position::new(5, 5);
        explosions.detonate(pos, &mut grid, &mut entities).unwrap();
        grid.set(pos, TileKind::Enemy).unwrap();
        for _ in 0..=EXPLOSION_TICKS {
            explosions.tick(&mut grid, &bombs).unwrap();
        }
        assert!(!explosions.contains(pos));
        assert_eq!(grid.get(pos).unwrap(), TileKind::Enemy);
    }

    #[test]
    fn test_expired_blast_uncovers_pending_bomb() {
        let (mut grid, mut entities) = setup();
        let mut bombs = BombTimers::new();
        let mut explosions = Explosions::new();
        let pending = Position::new(6, 5);
        bombs.place(pending, &mut grid).unwrap();
        explosions.detonate(Position::new(5, 5), &mut grid, &mut entities).unwrap();
        assert_eq!(grid.get(pending).unwrap(), TileKind::Explosion);

        for _ in 0..=EXPLOSION_TICKS {
            explosions.tick(&mut grid, &bombs).unwrap();
        }
        assert_eq!(grid.get(pending).unwrap(), TileKind::Bomb);
    }
}
