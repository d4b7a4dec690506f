// Intent scripts for headless runs: one symbol per tick
//
//   U D L R  move up/down/left/right
//   B        place a bomb
//   .        wait
//
// Whitespace is ignored; symbols are case-insensitive.

use crate::error::ScriptError;
use crate::types::{Direction, Intent};

pub fn parse_script(source: &str) -> Result<Vec<Intent>, ScriptError> {
    let mut intents = Vec::with_capacity(source.len());
    for (position, symbol) in source.chars().enumerate() {
        if symbol.is_whitespace() {
            continue;
        }
        let intent = match symbol.to_ascii_uppercase() {
            'U' => Intent::Move(Direction::Up),
            'D' => Intent::Move(Direction::Down),
            'L' => Intent::Move(Direction::Left),
            'R' => Intent::Move(Direction::Right),
            'B' => Intent::PlaceBomb,
            '.' => Intent::Wait,
            _ => return Err(ScriptError::UnknownIntent { position, symbol }),
        };
        intents.push(intent);
    }
    Ok(intents)
}
