use crate::actor::Position;
use crate::error::GridError;
use crate::grid::Grid;
use crate::simulator::{RunOutcome, Simulator};
use crate::visited::VisitedState;
use serde::Serialize;
use tracing::{debug, error, info};

/// Result of trying every single-cell obstruction on a grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Empty, non-start cells that were tried
    pub candidates: usize,
    /// Cells whose obstruction makes the agent loop, in row-major order
    pub loop_cells: Vec<Position>,
    pub exits: usize,
    /// Trials that hit the step budget. Also listed in `loop_cells`.
    pub budget_exceeded: usize,
}

impl SearchReport {
    pub fn loop_count(&self) -> usize {
        self.loop_cells.len()
    }
}

/// Try a wall on every empty cell except the agent's start and classify each run
///
/// Each trial clones `grid`, adds one wall and runs a fresh simulator from the
/// original start. The trial grid and its visited record are dropped before the
/// next cell is tried.
pub fn search_obstructions(grid: &Grid) -> Result<SearchReport, GridError> {
    let start = grid.locate_agent()?;
    let mut report = SearchReport::default();

    for cell in grid.empty_cells() {
        let trial = match grid.with_obstruction(cell) {
            Ok(trial) => trial,
            Err(e) => {
                debug!(x = cell.x, y = cell.y, error = %e, "skipping obstruction");
                continue;
            }
        };

        report.candidates += 1;
        let outcome = Simulator::new(&trial, start).run();
        debug!(x = cell.x, y = cell.y, ?outcome, "obstruction trial finished");

        match outcome {
            RunOutcome::Looped => report.loop_cells.push(cell),
            RunOutcome::Exited { .. } => report.exits += 1,
            RunOutcome::BudgetExceeded => {
                error!(x = cell.x, y = cell.y, "obstruction trial exceeded its step budget");
                report.budget_exceeded += 1;
                report.loop_cells.push(cell);
            }
        }
    }

    info!(
        candidates = report.candidates,
        loops = report.loop_count(),
        budget_exceeded = report.budget_exceeded,
        "obstruction search finished"
    );

    Ok(report)
}

/// Count cells at which one extra wall sends the agent into a loop
pub fn count_loop_obstructions(grid: &Grid) -> Result<usize, GridError> {
    Ok(search_obstructions(grid)?.loop_count())
}

/// Unobstructed run plus the full obstruction search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub unobstructed: RunOutcome,
    /// Cells and headings recorded by the unobstructed run
    #[serde(skip)]
    pub visited: VisitedState,
    pub search: SearchReport,
}

impl Analysis {
    /// Distinct cells visited before the agent leaves the unobstructed grid
    pub fn visited_cells(&self) -> Option<usize> {
        self.unobstructed.visited_cells()
    }

    pub fn loop_obstructions(&self) -> usize {
        self.search.loop_count()
    }
}

/// Compute both results for `grid`. Parse-level errors abort before any run.
pub fn analyze(grid: &Grid) -> Result<Analysis, GridError> {
    let start = grid.locate_agent()?;
    let mut simulator = Simulator::new(grid, start);
    let unobstructed = simulator.run();
    info!(?unobstructed, "unobstructed run finished");
    let visited = simulator.into_visited();

    let search = search_obstructions(grid)?;
    Ok(Analysis {
        unobstructed,
        visited,
        search,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_loop_cell() {
        let layout = "\
.#...
....#
.....
.^...
...#.
";
        let grid = Grid::parse(layout).unwrap();
        let report = search_obstructions(&grid).unwrap();

        assert_eq!(report.candidates, 25 - 3 - 1);
        assert_eq!(report.loop_cells, vec![Position::new(0, 3)]);
        assert_eq!(report.exits, report.candidates - 1);
        assert_eq!(report.budget_exceeded, 0);
    }

    #[test]
    fn test_no_loops_on_open_grid() {
        let grid = Grid::parse("..\n^.\n").unwrap();
        let report = search_obstructions(&grid).unwrap();

        assert_eq!(report.candidates, 3);
        assert_eq!(report.loop_count(), 0);
        assert_eq!(count_loop_obstructions(&grid).unwrap(), 0);
    }

    #[test]
    fn test_closing_an_enclosure_counts_as_loop() {
        let grid = Grid::parse("...\n#^#\n.#.\n").unwrap();
        let report = search_obstructions(&grid).unwrap();

        assert!(report.loop_cells.contains(&Position::new(1, 0)));
        assert_eq!(report.budget_exceeded, 0);
    }

    #[test]
    fn test_corner_turning_cycle_found_by_search() {
        // A wall at (2, 3) traps the agent in a 2x2 cycle that turns in every cell.
        let layout = "\
.#..
.>.#
#...
....
";
        let grid = Grid::parse(layout).unwrap();
        let report = search_obstructions(&grid).unwrap();

        assert_eq!(report.candidates, 16 - 3 - 1);
        assert_eq!(report.loop_cells, vec![Position::new(2, 3)]);
        assert_eq!(report.exits, report.candidates - 1);
        assert_eq!(report.budget_exceeded, 0);
    }

    #[test]
    fn test_search_leaves_grid_untouched() {
        let grid = Grid::parse(".#.\n...\n.^.\n").unwrap();
        let before = grid.clone();
        search_obstructions(&grid).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn test_search_requires_single_agent() {
        let grid = Grid::parse("^.\n.>\n").unwrap();
        assert!(matches!(search_obstructions(&grid), Err(GridError::MultipleAgents { count: 2 })));
        assert!(matches!(analyze(&grid), Err(GridError::MultipleAgents { count: 2 })));
    }

    #[test]
    fn test_analyze() {
        let layout = "\
.#...
....#
.....
.^...
...#.
";
        let grid = Grid::parse(layout).unwrap();
        let analysis = analyze(&grid).unwrap();

        assert_eq!(analysis.visited_cells(), Some(9));
        assert_eq!(analysis.visited.cell_count(), 9);
        assert!(analysis.visited.is_visited(Position::new(1, 3)));
        assert_eq!(analysis.loop_obstructions(), 1);
    }
}
