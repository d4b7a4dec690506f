// Entity registry: the player record and the enemy roster

use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub position: Position,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub id: u32,
    pub position: Position,
    pub alive: bool,
}

/// Identity and liveness of everything that moves.
///
/// The registry never touches the grid. Whoever moves an entity updates the
/// record and both affected cells.
#[derive(Debug, Clone)]
pub struct Entities {
    pub player: Player,
    pub enemies: Vec<Enemy>,
}

impl Entities {
    pub fn spawn(player: Position, enemies: &[Position]) -> Self {
        Entities {
            player: Player {
                position: player,
                alive: true,
            },
            enemies: enemies
                .iter()
                .enumerate()
                .map(|(i, &position)| Enemy {
                    id: (i + 1) as u32,
                    position,
                    alive: true,
                })
                .collect(),
        }
    }

    /// The living enemy standing at `pos`, if any
    pub fn enemy_at_mut(&mut self, pos: Position) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.alive && e.position == pos)
    }

    pub fn enemy_at(&self, pos: Position) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.alive && e.position == pos)
    }

    pub fn player_at(&self, pos: Position) -> bool {
        self.player.alive && self.player.position == pos
    }

    pub fn alive_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn all_enemies_dead(&self) -> bool {
        self.alive_enemy_count() == 0
    }
}
