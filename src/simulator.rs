use crate::actor::{Agent, Heading, Position};
use crate::error::GridError;
use crate::grid::{Cell, Grid};
use crate::trace::RunTrace;
use crate::visited::VisitedState;
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

/// Lifecycle of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Exited,
    Looped,
    BudgetExceeded,
}

/// What a single call to [`Simulator::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepEvent {
    /// Wall ahead; the agent rotated clockwise in place
    Turned { at: Position, heading: Heading },
    Moved { from: Position, to: Position, heading: Heading },
    /// Next cell is off the grid
    Exited { at: Position, heading: Heading },
    /// The agent already stood on `at` facing `heading` this run
    Looped { at: Position, heading: Heading },
    BudgetExceeded { steps: usize },
}

/// Terminal classification of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Exited { visited_cells: usize },
    Looped,
    BudgetExceeded,
}

impl RunOutcome {
    /// A repeated state, or a run that never reached a verdict
    pub fn is_loop(&self) -> bool {
        matches!(self, RunOutcome::Looped | RunOutcome::BudgetExceeded)
    }

    /// Distinct cells visited; only meaningful when the agent left the grid
    pub fn visited_cells(&self) -> Option<usize> {
        match self {
            RunOutcome::Exited { visited_cells } => Some(*visited_cells),
            _ => None,
        }
    }
}

/// Advances one agent over a borrowed grid until it exits or repeats a state
///
/// Every step first records the agent's current `(cell, heading)` in the
/// visited record. If the pair was already there the agent is about to
/// replay a path it has walked before, so the run is a cycle. Otherwise a
/// wall ahead rotates the agent clockwise in place, an empty cell ahead is
/// entered and an edge ahead ends the run.
///
/// Each non-terminal step records a new pair, so a verdict comes within
/// `rows * cols * 4` steps. The step budget is a backstop on top of that and
/// reports [`RunState::BudgetExceeded`], which callers treat as a loop.
pub struct Simulator<'g> {
    grid: &'g Grid,
    agent: Agent,
    visited: VisitedState,
    state: RunState,
    steps: usize,
    moves: usize,
    step_budget: usize,
}

impl<'g> Simulator<'g> {
    pub fn new(grid: &'g Grid, start: Agent) -> Self {
        Simulator {
            grid,
            agent: start,
            visited: VisitedState::new(grid),
            state: RunState::Running,
            steps: 0,
            moves: 0,
            step_budget: Self::step_budget(grid),
        }
    }

    /// Start from the single agent marker of `grid`
    pub fn from_grid(grid: &'g Grid) -> Result<Self, GridError> {
        let start = grid.locate_agent()?;
        Ok(Self::new(grid, start))
    }

    /// Number of distinct `(position, heading)` states on `grid`
    pub fn step_budget(grid: &Grid) -> usize {
        grid.cell_count() * 4
    }

    /// Perform one transition. Returns `None` once the run is terminal.
    pub fn step(&mut self) -> Option<StepEvent> {
        if self.state != RunState::Running {
            return None;
        }

        if self.steps >= self.step_budget {
            self.state = RunState::BudgetExceeded;
            error!(
                steps = self.steps,
                budget = self.step_budget,
                "simulation exceeded its step budget without a verdict"
            );
            return Some(StepEvent::BudgetExceeded { steps: self.steps });
        }

        self.steps += 1;

        let at = self.agent.position;
        let heading = self.agent.heading;

        let event = if !self.visited.insert(at, heading) {
            self.state = RunState::Looped;
            StepEvent::Looped { at, heading }
        } else {
            let ahead = self.agent.ahead();
            match self.grid.get_cell(ahead) {
                None => {
                    self.state = RunState::Exited;
                    StepEvent::Exited { at, heading }
                }
                Some(Cell::Wall) => {
                    self.agent.turn();
                    StepEvent::Turned {
                        at,
                        heading: self.agent.heading,
                    }
                }
                Some(Cell::Empty) => {
                    self.agent.advance();
                    self.moves += 1;
                    StepEvent::Moved {
                        from: at,
                        to: ahead,
                        heading,
                    }
                }
            }
        };

        if self.state != RunState::Running {
            trace!(steps = self.steps, moves = self.moves, ?event, "run finished");
        }

        Some(event)
    }

    /// Step until a terminal state is reached
    pub fn run(&mut self) -> RunOutcome {
        self.run_with(|_, _| {})
    }

    /// Like [`Simulator::run`], recording every transition into `trace`
    pub fn run_traced(&mut self, trace: &mut RunTrace) -> RunOutcome {
        self.run_with(|step, event| trace.record(step, event))
    }

    fn run_with(&mut self, mut on_step: impl FnMut(usize, StepEvent)) -> RunOutcome {
        while let Some(event) = self.step() {
            on_step(self.steps, event);
        }
        self.classify()
    }

    /// Outcome of the run, `None` while still running
    pub fn outcome(&self) -> Option<RunOutcome> {
        match self.state {
            RunState::Running => None,
            _ => Some(self.classify()),
        }
    }

    fn classify(&self) -> RunOutcome {
        match self.state {
            RunState::Exited => RunOutcome::Exited {
                visited_cells: self.visited.cell_count(),
            },
            RunState::Looped => RunOutcome::Looped,
            // run_with only returns once step() has reached a terminal state
            RunState::BudgetExceeded | RunState::Running => RunOutcome::BudgetExceeded,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn visited(&self) -> &VisitedState {
        &self.visited
    }

    /// Consume the simulator, keeping its visited record
    pub fn into_visited(self) -> VisitedState {
        self.visited
    }

    /// Transitions taken so far, rotations included
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn moves(&self) -> usize {
        self.moves
    }
}

/// Run the unobstructed simulation for the agent marked in `grid`
pub fn simulate(grid: &Grid) -> Result<RunOutcome, GridError> {
    Ok(Simulator::from_grid(grid)?.run())
}
