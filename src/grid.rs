use crate::actor::{Agent, Heading, Position};
use crate::error::GridError;
use crate::visited::VisitedState;
use std::fs;
use std::path::Path;

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

/// Grid structure for storing cell states
///
/// Agent markers found while parsing are kept separately; their cells are
/// stored as `Empty`. A grid is never mutated once built: trial grids are
/// produced with [`Grid::with_obstruction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    cells: Vec<Cell>,
    markers: Vec<Agent>,
}

impl Grid {
    /// Create a grid with all cells empty and no agent marker
    ///
    /// Fails if the dimensions do not fit the `i32` coordinate space.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let (rows, cols) = Self::checked_dimensions(rows, cols)?;
        Ok(Grid {
            rows,
            cols,
            cells: vec![Cell::Empty; (rows * cols) as usize],
            markers: Vec::new(),
        })
    }

    /// Row and column counts whose cell ids all fit in an `i32`
    fn checked_dimensions(rows: usize, cols: usize) -> Result<(i32, i32), GridError> {
        let invalid = || GridError::InvalidDimensions { rows, cols };
        let rows_i = i32::try_from(rows).map_err(|_| invalid())?;
        let cols_i = i32::try_from(cols).map_err(|_| invalid())?;
        rows_i.checked_mul(cols_i).ok_or_else(invalid)?;
        Ok((rows_i, cols_i))
    }

    /// Parse a layout of `.` (empty), `#` (wall) and `^>v<` (agent marker)
    ///
    /// Every row must have the same width. Trailing blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut lines: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        let Some(first) = lines.first() else {
            return Err(GridError::MalformedGrid {
                line: 1,
                reason: "layout has no rows".to_string(),
            });
        };

        let cols = first.chars().count();
        if cols == 0 {
            return Err(GridError::MalformedGrid {
                line: 1,
                reason: "first row is empty".to_string(),
            });
        }

        let (rows_i, cols_i) = Self::checked_dimensions(lines.len(), cols)?;
        let mut cells = Vec::with_capacity(cols * lines.len());
        let mut markers = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(GridError::MalformedGrid {
                    line: y + 1,
                    reason: format!("expected {} columns, found {}", cols, width),
                });
            }

            for (x, symbol) in line.chars().enumerate() {
                match symbol {
                    '.' => cells.push(Cell::Empty),
                    '#' => cells.push(Cell::Wall),
                    _ => match Heading::from_marker(symbol) {
                        Some(heading) => {
                            markers.push(Agent::new(Position::new(x as i32, y as i32), heading));
                            cells.push(Cell::Empty);
                        }
                        None => {
                            return Err(GridError::MalformedGrid {
                                line: y + 1,
                                reason: format!("unknown symbol {:?} at column {}", symbol, x + 1),
                            });
                        }
                    },
                }
            }
        }

        Ok(Grid {
            rows: rows_i,
            cols: cols_i,
            cells,
            markers,
        })
    }

    /// Read and parse a layout file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Find the single agent marker and return the agent it describes
    pub fn locate_agent(&self) -> Result<Agent, GridError> {
        match self.markers.as_slice() {
            [] => Err(GridError::NoAgent),
            [agent] => Ok(*agent),
            many => Err(GridError::MultipleAgents { count: many.len() }),
        }
    }

    /// Clone this grid with one extra wall at `pos`
    ///
    /// The target must be an empty, in-bounds cell that is not an agent marker.
    pub fn with_obstruction(&self, pos: Position) -> Result<Grid, GridError> {
        let reason = if !self.in_bounds(pos) {
            Some("cell is outside the grid")
        } else if self.is_wall(pos) {
            Some("cell is already a wall")
        } else if self.is_marker(pos) {
            Some("cell is the agent's start position")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(GridError::InvalidObstruction {
                x: pos.x,
                y: pos.y,
                reason,
            });
        }

        let mut grid = self.clone();
        let id = self.get_id(pos.x, pos.y);
        grid.cells[id as usize] = Cell::Wall;
        Ok(grid)
    }

    /// Check if `pos` lies inside the grid
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    /// Check if the cell at `pos` is a wall. Out of bounds is not a wall.
    pub fn is_wall(&self, pos: Position) -> bool {
        self.get_cell(pos) == Some(Cell::Wall)
    }

    pub fn is_marker(&self, pos: Position) -> bool {
        self.markers.iter().any(|agent| agent.position == pos)
    }

    /// Get cell state at `pos`, `None` when out of bounds
    pub fn get_cell(&self, pos: Position) -> Option<Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[self.get_id(pos.x, pos.y) as usize])
    }

    /// Convert (x, y) coordinates to cell ID
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.cols
    }

    /// Convert cell ID to (x, y) coordinates
    pub fn get_coords(&self, id: i32) -> (i32, i32) {
        (id % self.cols, id / self.cols)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Wall).count()
    }

    /// Empty cells that are not agent markers, in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len() as i32)
            .map(move |id| {
                let (x, y) = self.get_coords(id);
                Position::new(x, y)
            })
            .filter(move |&pos| self.get_cell(pos) == Some(Cell::Empty) && !self.is_marker(pos))
    }

    /// Text rendering of the grid
    ///
    /// `#` walls, marker symbols for agent starts, `O` for the listed
    /// obstructions, `X` for visited cells and `.` otherwise.
    pub fn render(&self, visited: &VisitedState, obstructions: &[Position]) -> String {
        let mut result = String::with_capacity(self.cells.len() + self.rows as usize);

        for y in 0..self.rows {
            for x in 0..self.cols {
                let pos = Position::new(x, y);
                let marker = self.markers.iter().find(|agent| agent.position == pos);
                let symbol = if let Some(agent) = marker {
                    agent.heading.marker()
                } else if self.is_wall(pos) {
                    '#'
                } else if obstructions.contains(&pos) {
                    'O'
                } else if visited.is_visited(pos) {
                    'X'
                } else {
                    '.'
                };
                result.push(symbol);
            }
            result.push('\n');
        }

        result
    }
}
