//! Tile-based arena simulation: a player, wandering enemies, timed bombs
//! and cross-shaped blasts on a fixed 15x15 grid.
//!
//! [`game::Game`] is the entry point. It owns all state and advances in
//! discrete ticks; rendering and input binding live outside this crate.

pub mod bombs;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod explosions;
pub mod game;
pub mod grid;
pub mod logging;
pub mod script;
pub mod snapshot;
pub mod types;

pub use bombs::FuseStage;
pub use error::{ScriptError, SimError};
pub use game::Game;
pub use snapshot::GridSnapshot;
pub use types::{Direction, GameStatus, Intent, Position, TileKind};
