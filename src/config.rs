//! Configuration constants for the blast grid simulation.

// Grid dimensions
pub const GRID_ROWS: i32 = 15; // Cells along y
pub const GRID_COLS: i32 = 15; // Cells along x

// Spawn points (x, y)
pub const PLAYER_SPAWN: (i32, i32) = (1, 1);
pub const ENEMY_SPAWNS: [(i32, i32); 1] = [(13, 13)];

// Timers, in ticks
pub const BOMB_FUSE_TICKS: u32 = 40; // Placement to detonation
pub const EXPLOSION_TICKS: u32 = 15; // Lifetime of a blast cell

// Fuse stages used by renderers to pick a blink rate
pub const FUSE_WARNING_BELOW: u32 = 25;
pub const FUSE_CRITICAL_BELOW: u32 = 13;

// Tick cadence for the driver loop
pub const TICK_INTERVAL_NORMAL_MS: u64 = 150;
pub const TICK_INTERVAL_FAST_MS: u64 = 60;

// Driver limits
pub const DEFAULT_MAX_TICKS: u64 = 2000; // Headless runs stop here if nothing ends the game
pub const DEFAULT_SEED: u64 = 0x5eed;
