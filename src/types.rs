// Shared value types: positions, directions, tile kinds, game status

use std::fmt;

/// A cell coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The neighbouring cell one step in `direction`
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Origin plus its four orthogonal neighbours
    pub fn cross(self) -> [Position; 5] {
        [
            self,
            self.step(Direction::Right),
            self.step(Direction::Left),
            self.step(Direction::Down),
            self.step(Direction::Up),
        ]
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Evaluation order used by the enemy policy
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (dx, dy) with y growing downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What occupies a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Wall,
    Empty,
    Player,
    Bomb,
    Explosion,
    Enemy,
}

impl TileKind {
    /// Single-character glyph for text snapshots
    pub fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Empty => '.',
            TileKind::Player => 'P',
            TileKind::Bomb => 'o',
            TileKind::Explosion => '*',
            TileKind::Enemy => 'E',
        }
    }
}

/// One external request, applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    PlaceBomb,
    Wait,
}

// Outcome of the simulation so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Running
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Running => "running",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        f.write_str(label)
    }
}
