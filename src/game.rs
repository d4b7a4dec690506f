use crate::bombs::{BombTimers, FuseStage};
use crate::config;
use crate::entities::{Enemy, Entities, Player};
use crate::enemy;
use crate::error::SimError;
use crate::explosions::Explosions;
use crate::grid::Grid;
use crate::snapshot::GridSnapshot;
use crate::types::{Direction, GameStatus, Intent, Position, TileKind};
use crate::{debug_input, debug_sim};
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// The Game struct owns the whole simulation state and advances it one tick
/// at a time. External intents are applied between ticks, never during one.
pub struct Game {
    grid: Grid,
    entities: Entities,
    bombs: BombTimers,
    explosions: Explosions,
    rng: Pcg32,
    seed: u64,
    player_spawn: Position,
    enemy_spawns: Vec<Position>,
    status: GameStatus,
    ticks: u64,
}

impl Game {
    /// Create a new game on the fixed layout with the default spawns
    pub fn new(seed: u64) -> Result<Self, SimError> {
        let enemies: Vec<Position> = config::ENEMY_SPAWNS.iter().map(|&p| p.into()).collect();
        Self::with_spawns(seed, config::PLAYER_SPAWN.into(), &enemies)
    }

    pub(crate) fn with_spawns(
        seed: u64,
        player: Position,
        enemies: &[Position],
    ) -> Result<Self, SimError> {
        let entities = Entities::spawn(player, enemies);
        let mut game = Game {
            grid: Grid::new(),
            entities,
            bombs: BombTimers::new(),
            explosions: Explosions::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            player_spawn: player,
            enemy_spawns: enemies.to_vec(),
            status: GameStatus::Running,
            ticks: 0,
        };
        game.reset()?;
        Ok(game)
    }

    /// Re-initializes entities, bombs and explosions, regenerates the grid,
    /// and reseeds the enemy RNG so a reset replays identically.
    pub fn reset(&mut self) -> Result<GridSnapshot, SimError> {
        self.entities = Entities::spawn(self.player_spawn, &self.enemy_spawns);
        self.bombs = BombTimers::new();
        self.explosions = Explosions::new();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.status = GameStatus::Running;
        self.ticks = 0;
        self.grid.regenerate(&self.entities)?;
        info!(
            "Simulation reset: {}x{} grid, {} enemies, seed {:#x}",
            self.grid.cols(),
            self.grid.rows(),
            self.entities.enemies.len(),
            self.seed
        );
        Ok(self.grid_snapshot())
    }

    /// Moves the player one cell if alive, the game is running and the
    /// target is empty. Returns whether the player moved.
    pub fn move_player(&mut self, direction: Direction) -> Result<bool, SimError> {
        if self.status.is_over() || !self.entities.player.alive {
            return Ok(false);
        }
        let from = self.entities.player.position;
        let to = from.step(direction);
        if self.grid.get(to)? != TileKind::Empty {
            debug_input!("Move {:?} from {} blocked", direction, from);
            return Ok(false);
        }

        // A bomb the player was standing on keeps its cell
        let vacated = if self.bombs.contains(from) {
            TileKind::Bomb
        } else {
            TileKind::Empty
        };
        self.grid.set(from, vacated)?;
        self.grid.set(to, TileKind::Player)?;
        self.entities.player.position = to;
        debug_input!("Player moved {:?} to {}", direction, to);
        Ok(true)
    }

    /// Drops a bomb on the player's cell. Returns whether a bomb was placed.
    pub fn place_bomb(&mut self) -> Result<bool, SimError> {
        if self.status.is_over() || !self.entities.player.alive {
            return Ok(false);
        }
        let placed = self.bombs.place(self.entities.player.position, &mut self.grid)?;
        if !placed {
            debug_input!("Bomb already at {}", self.entities.player.position);
        }
        Ok(placed)
    }

    /// Applies one external intent immediately
    pub fn apply(&mut self, intent: Intent) -> Result<bool, SimError> {
        match intent {
            Intent::Move(direction) => self.move_player(direction),
            Intent::PlaceBomb => self.place_bomb(),
            Intent::Wait => Ok(false),
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Order: age bombs, detonate the ones that ran out, age blasts that
    /// existed before this tick, move enemies, then check win before lose.
    /// Once the game has ended the status is fixed and nothing advances.
    pub fn tick(&mut self) -> Result<GameStatus, SimError> {
        if self.status.is_over() {
            return Ok(self.status);
        }
        self.ticks += 1;

        let fired = self.bombs.tick();
        if !fired.is_empty() {
            debug_sim!(tick: self.ticks, "detonations: {}", fired.len());
        }
        for origin in fired {
            self.explosions
                .detonate(origin, &mut self.grid, &mut self.entities)?;
        }

        self.explosions.tick(&mut self.grid, &self.bombs)?;

        enemy::advance_enemies(&mut self.grid, &mut self.entities, &mut self.rng)?;

        self.status = self.evaluate();
        match self.status {
            GameStatus::Won => info!("Tick {} all enemies destroyed, player wins", self.ticks),
            GameStatus::Lost => info!("Tick {} player destroyed, game over", self.ticks),
            GameStatus::Running => {}
        }
        Ok(self.status)
    }

    fn evaluate(&self) -> GameStatus {
        if self.entities.all_enemies_dead() {
            GameStatus::Won
        } else if !self.entities.player.alive {
            GameStatus::Lost
        } else {
            GameStatus::Running
        }
    }

    pub fn grid_snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid)
    }

    /// Remaining fuse of the bomb at (x, y), if there is one
    pub fn bomb_countdown(&self, x: i32, y: i32) -> Option<u32> {
        self.bombs.countdown_at(Position::new(x, y))
    }

    pub fn fuse_stage(&self, x: i32, y: i32) -> Option<FuseStage> {
        self.bomb_countdown(x, y).map(FuseStage::from_countdown)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn player(&self) -> &Player {
        &self.entities.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.entities.enemies
    }

    /// What a cell should show given the records alone.
    ///
    /// Precedence: wall, explosion, bomb, living player, living enemy, empty.
    pub fn projected_tile(&self, pos: Position) -> TileKind {
        if self.grid.is_layout_wall(pos) {
            TileKind::Wall
        } else if self.explosions.contains(pos) {
            TileKind::Explosion
        } else if self.bombs.contains(pos) {
            TileKind::Bomb
        } else if self.entities.player_at(pos) {
            TileKind::Player
        } else if self.entities.enemy_at(pos).is_some() {
            TileKind::Enemy
        } else {
            TileKind::Empty
        }
    }

    /// Whether every grid cell matches the projection of the records
    pub fn grid_is_consistent(&self) -> bool {
        (0..self.grid.rows()).all(|y| {
            (0..self.grid.cols()).all(|x| {
                let pos = Position::new(x, y);
                self.grid.get(pos).ok() == Some(self.projected_tile(pos))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BOMB_FUSE_TICKS, EXPLOSION_TICKS};
    use proptest::prelude::*;

    fn tile(game: &Game, x: i32, y: i32) -> TileKind {
        game.grid_snapshot().get(Position::new(x, y)).unwrap()
    }

    #[test]
    fn test_reset_layout() {
        let mut game = Game::new(1).unwrap();
        let snapshot = game.reset().unwrap();
        assert_eq!(snapshot.get(Position::new(1, 1)), Some(TileKind::Player));
        assert_eq!(snapshot.get(Position::new(13, 13)), Some(TileKind::Enemy));
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.ticks(), 0);
        assert!(game.grid_is_consistent());
    }

    #[test]
    fn test_player_movement() {
        let mut game = Game::new(1).unwrap();
        assert!(!game.move_player(Direction::Up).unwrap());
        assert!(!game.move_player(Direction::Left).unwrap());
        assert!(game.move_player(Direction::Right).unwrap());
        assert_eq!(game.player().position, Position::new(2, 1));
        assert_eq!(tile(&game, 1, 1), TileKind::Empty);
        assert_eq!(tile(&game, 2, 1), TileKind::Player);
        // (2,2) is a pillar
        assert!(!game.move_player(Direction::Down).unwrap());
        assert!(game.grid_is_consistent());
    }

    #[test]
    fn test_stepping_off_bomb_keeps_bomb_cell() {
        let mut game = Game::new(1).unwrap();
        assert!(game.place_bomb().unwrap());
        assert_eq!(tile(&game, 1, 1), TileKind::Bomb);
        assert!(game.move_player(Direction::Right).unwrap());
        assert_eq!(tile(&game, 1, 1), TileKind::Bomb);
        assert!(!game.move_player(Direction::Left).unwrap());
        assert!(game.grid_is_consistent());
    }

    #[test]
    fn test_blocked_placement() {
        let mut game = Game::new(1).unwrap();
        assert!(game.place_bomb().unwrap());
        assert!(!game.place_bomb().unwrap());
        assert_eq!(game.bombs.len(), 1);
        assert_eq!(game.bomb_countdown(1, 1), Some(BOMB_FUSE_TICKS));
    }

    #[test]
    fn test_fuse_and_blast() {
        let mut game = Game::new(1).unwrap();
        game.place_bomb().unwrap();
        for _ in 0..BOMB_FUSE_TICKS - 1 {
            game.tick().unwrap();
        }
        assert_eq!(game.bomb_countdown(1, 1), Some(1));
        assert_eq!(game.fuse_stage(1, 1), Some(FuseStage::Critical));
        assert!(game.player().alive);
        assert_eq!(tile(&game, 1, 1), TileKind::Bomb);

        game.tick().unwrap();
        assert_eq!(tile(&game, 1, 1), TileKind::Explosion);
        assert!(!game.player().alive);
        assert!(game.status().is_over());
        assert_eq!(game.bomb_countdown(1, 1), None);
        assert!(game.grid_is_consistent());
    }

    #[test]
    fn test_win_when_last_enemy_dies() {
        let mut game = Game::with_spawns(5, Position::new(1, 1), &[Position::new(13, 13)]).unwrap();
        game.bombs.arm(Position::new(12, 13), 1, &mut game.grid).unwrap();
        assert_eq!(game.tick().unwrap(), GameStatus::Won);
        assert!(!game.enemies()[0].alive);
        assert!(game.player().alive);
        assert!(game.grid_is_consistent());
    }

    #[test]
    fn test_win_takes_precedence_over_loss() {
        let mut game = Game::with_spawns(5, Position::new(11, 13), &[Position::new(13, 13)]).unwrap();
        game.bombs.arm(Position::new(12, 13), 1, &mut game.grid).unwrap();
        assert_eq!(game.tick().unwrap(), GameStatus::Won);
        assert!(!game.player().alive);
        assert!(!game.enemies()[0].alive);
    }

    #[test]
    fn test_loss_when_only_player_dies() {
        let mut game = Game::with_spawns(5, Position::new(3, 1), &[Position::new(13, 13)]).unwrap();
        game.bombs.arm(Position::new(3, 1), 1, &mut game.grid).unwrap();
        assert_eq!(game.tick().unwrap(), GameStatus::Lost);
    }

    #[test]
    fn test_ended_game_is_frozen() {
        let mut game = Game::with_spawns(5, Position::new(1, 1), &[Position::new(13, 13)]).unwrap();
        game.bombs.arm(Position::new(12, 13), 1, &mut game.grid).unwrap();
        game.tick().unwrap();
        let before = game.grid_snapshot();

        assert!(!game.move_player(Direction::Right).unwrap());
        assert!(!game.place_bomb().unwrap());
        for _ in 0..EXPLOSION_TICKS + 5 {
            assert_eq!(game.tick().unwrap(), GameStatus::Won);
        }
        assert_eq!(game.ticks(), 1);
        assert_eq!(game.grid_snapshot(), before);
    }

    #[test]
    fn test_new_blast_gets_full_duration() {
        let mut game = Game::with_spawns(5, Position::new(1, 1), &[Position::new(13, 13)]).unwrap();
        let origin = Position::new(5, 5);
        game.bombs.arm(origin, 1, &mut game.grid).unwrap();
        game.tick().unwrap();
        assert_eq!(game.explosions.countdown_at(origin), Some(EXPLOSION_TICKS));

        for _ in 0..EXPLOSION_TICKS - 1 {
            game.tick().unwrap();
        }
        assert_eq!(tile(&game, 5, 5), TileKind::Explosion);
        game.tick().unwrap();
        assert_ne!(tile(&game, 5, 5), TileKind::Explosion);
        assert!(game.grid_is_consistent());
    }

    #[test]
    fn test_reset_restores_start_and_replays() {
        let mut game = Game::new(77).unwrap();
        let fresh = game.grid_snapshot();
        let mut first_run = Vec::new();
        for _ in 0..20 {
            game.tick().unwrap();
            first_run.push(game.enemies()[0].position);
        }
        game.move_player(Direction::Down).unwrap();
        game.place_bomb().unwrap();

        assert_eq!(game.reset().unwrap(), fresh);
        assert_eq!(game.bomb_countdown(1, 2), None);
        let mut second_run = Vec::new();
        for _ in 0..20 {
            game.tick().unwrap();
            second_run.push(game.enemies()[0].position);
        }
        assert_eq!(first_run, second_run);
    }

    #[test]
    fn test_apply_intents() {
        let mut game = Game::new(1).unwrap();
        assert!(game.apply(Intent::Move(Direction::Down)).unwrap());
        assert!(game.apply(Intent::PlaceBomb).unwrap());
        assert!(!game.apply(Intent::Wait).unwrap());
        assert_eq!(game.bomb_countdown(1, 2), Some(BOMB_FUSE_TICKS));
    }

    fn arb_intent() -> impl Strategy<Value = Intent> {
        prop_oneof![
            4 => prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ]
            .prop_map(Intent::Move),
            1 => Just(Intent::PlaceBomb),
            2 => Just(Intent::Wait),
        ]
    }

    proptest! {
        #[test]
        fn test_grid_matches_records_every_step(
            seed in any::<u64>(),
            intents in proptest::collection::vec(arb_intent(), 0..300),
        ) {
            let mut game = Game::new(seed).unwrap();
            prop_assert!(game.grid_is_consistent());
            for intent in intents {
                game.apply(intent).unwrap();
                prop_assert!(game.grid_is_consistent());
                game.tick().unwrap();
                prop_assert!(game.grid_is_consistent());
            }
        }

        #[test]
        fn test_enemies_only_stand_on_open_cells(
            seed in any::<u64>(),
            ticks in 1usize..200,
        ) {
            let mut game = Game::new(seed).unwrap();
            for _ in 0..ticks {
                game.tick().unwrap();
                for enemy in game.enemies().iter().filter(|e| e.alive) {
                    prop_assert!(!game.grid.is_layout_wall(enemy.position));
                    prop_assert_ne!(enemy.position, game.player().position);
                }
            }
        }
    }
}
