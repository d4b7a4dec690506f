// Simulation error types: grid bounds violations and script parse failures

use thiserror::Error;

/// Simulation Errors
///
/// Gameplay rule violations (blocked moves, duplicate bombs, acting while
/// dead) are not errors; they are ignored. Anything surfacing here is a bug.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum SimError {
    #[error("Cell ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBounds { x: i32, y: i32, cols: i32, rows: i32 },
}

/// Intent script errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Unknown intent '{symbol}' at position {position}")]
    UnknownIntent { position: usize, symbol: char },
}
