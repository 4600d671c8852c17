use serde::{Deserialize, Serialize};

/// A cell on the grid. `x` is the column, `y` the row (row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The neighbouring cell one step along `heading`
    pub fn step(&self, heading: Heading) -> Position {
        let (dx, dy) = heading.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

/// One of the four cardinal directions the agent can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Parse a layout marker symbol (`^`, `>`, `v`, `<`)
    pub fn from_marker(symbol: char) -> Option<Heading> {
        match symbol {
            '^' => Some(Heading::Up),
            '>' => Some(Heading::Right),
            'v' => Some(Heading::Down),
            '<' => Some(Heading::Left),
            _ => None,
        }
    }

    pub fn marker(&self) -> char {
        match self {
            Heading::Up => '^',
            Heading::Right => '>',
            Heading::Down => 'v',
            Heading::Left => '<',
        }
    }

    /// Turn 90 degrees clockwise
    pub fn rotate_clockwise(&self) -> Heading {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    /// Unit offset (dx, dy) in grid coordinates; y grows downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
        }
    }

    /// Bit used for this heading in a per-cell heading mask
    pub fn bit(&self) -> u8 {
        match self {
            Heading::Up => 0b0001,
            Heading::Right => 0b0010,
            Heading::Down => 0b0100,
            Heading::Left => 0b1000,
        }
    }
}

/// The single moving agent of a simulation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Agent {
    pub position: Position,
    pub heading: Heading,
}

impl Agent {
    pub fn new(position: Position, heading: Heading) -> Self {
        Agent { position, heading }
    }

    /// Cell directly in front of the agent (may be outside the grid)
    pub fn ahead(&self) -> Position {
        self.position.step(self.heading)
    }

    /// Rotate in place; position is unchanged
    pub fn turn(&mut self) {
        self.heading = self.heading.rotate_clockwise();
    }

    pub fn advance(&mut self) {
        self.position = self.ahead();
    }
}
