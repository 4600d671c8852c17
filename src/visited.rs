use crate::actor::{Heading, Position};
use crate::grid::Grid;

/// Headings the agent has occupied each cell with during one run
///
/// One 4-bit mask per cell, indexed by cell id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedState {
    rows: i32,
    cols: i32,
    headings: Vec<u8>,
}

impl VisitedState {
    /// Empty record sized for `grid`
    pub fn new(grid: &Grid) -> Self {
        VisitedState {
            rows: grid.rows,
            cols: grid.cols,
            headings: vec![0; grid.cell_count()],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.x >= self.cols || pos.y < 0 || pos.y >= self.rows {
            return None;
        }
        Some((pos.x + pos.y * self.cols) as usize)
    }

    pub fn contains(&self, pos: Position, heading: Heading) -> bool {
        self.index(pos)
            .is_some_and(|i| self.headings[i] & heading.bit() != 0)
    }

    /// Record `(pos, heading)`. Returns false if it was already present.
    pub fn insert(&mut self, pos: Position, heading: Heading) -> bool {
        let Some(i) = self.index(pos) else {
            return false;
        };
        let fresh = self.headings[i] & heading.bit() == 0;
        self.headings[i] |= heading.bit();
        fresh
    }

    /// Whether the cell was occupied with any heading
    pub fn is_visited(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.headings[i] != 0)
    }

    /// Distinct positions visited, irrespective of heading
    pub fn cell_count(&self) -> usize {
        self.headings.iter().filter(|&&mask| mask != 0).count()
    }

    /// Number of recorded (position, heading) pairs
    pub fn state_count(&self) -> usize {
        self.headings.iter().map(|mask| mask.count_ones() as usize).sum()
    }

    /// Visited positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols;
        self.headings
            .iter()
            .enumerate()
            .filter(|&(_, &mask)| mask != 0)
            .map(move |(i, _)| Position::new(i as i32 % cols, i as i32 / cols))
    }
}

/// Count distinct positions present in a visited-state record
pub fn visited_cell_count(visited: &VisitedState) -> usize {
    visited.cell_count()
}
