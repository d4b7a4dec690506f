// Enemy policy: random walk over empty cells, plus the enemy-reaches-player check

use crate::debug_enemy;
use crate::entities::Entities;
use crate::error::SimError;
use crate::grid::Grid;
use crate::types::{Direction, Position, TileKind};
use rand::Rng;
use rand::seq::SliceRandom;

/// Directions an enemy at `from` may step in this tick.
/// Only `empty` cells are legal targets.
pub fn legal_moves(grid: &Grid, from: Position) -> Result<Vec<Direction>, SimError> {
    let mut moves = Vec::with_capacity(4);
    for direction in Direction::ALL {
        let target = from.step(direction);
        if grid.contains(target) && grid.get(target)? == TileKind::Empty {
            moves.push(direction);
        }
    }
    Ok(moves)
}

/// Moves every living enemy one step, each independently and in roster order.
///
/// An enemy with no legal move stays put. After moving, an enemy sharing the
/// player's cell kills the player. The empty-cell filter keeps that from
/// happening today; the check stays so that any future movement rule which
/// allows it still ends the game.
pub fn advance_enemies<R: Rng + ?Sized>(
    grid: &mut Grid,
    entities: &mut Entities,
    rng: &mut R,
) -> Result<(), SimError> {
    for i in 0..entities.enemies.len() {
        if !entities.enemies[i].alive {
            continue;
        }
        let from = entities.enemies[i].position;
        let moves = legal_moves(grid, from)?;

        if let Some(&direction) = moves.choose(rng) {
            let to = from.step(direction);
            grid.set(from, TileKind::Empty)?;
            grid.set(to, TileKind::Enemy)?;
            entities.enemies[i].position = to;
            debug_enemy!("Enemy {} moved {:?} to {}", entities.enemies[i].id, direction, to);
        }

        if entities.player.alive && entities.enemies[i].position == entities.player.position {
            entities.player.alive = false;
            debug_enemy!("Enemy {} reached the player at {}", entities.enemies[i].id, entities.player.position);
        }
    }
    Ok(())
}
