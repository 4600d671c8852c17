pub mod actor;
pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod obstruction;
pub mod simulator;
pub mod trace;
pub mod visited;

pub use actor::{Agent, Heading, Position};
pub use error::GridError;
pub use grid::{Cell, Grid};
pub use obstruction::{analyze, count_loop_obstructions, search_obstructions, Analysis, SearchReport};
pub use simulator::{simulate, RunOutcome, RunState, Simulator, StepEvent};
pub use trace::RunTrace;
pub use visited::{visited_cell_count, VisitedState};
