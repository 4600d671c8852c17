use arboard::Clipboard;
use macroquad::prelude::*;
use patrol_sim::config::Config;
use patrol_sim::{analyze, logging, Agent, Analysis, Grid, Position, RunOutcome, Simulator, VisitedState};
use tracing::{error, info, warn};

/// A single obstruction placed by clicking, with its simulated result
struct Trial {
    cell: Position,
    visited: VisitedState,
    outcome: RunOutcome,
}

/// Visualization state
struct ViewState {
    grid: Grid,
    start: Agent,
    analysis: Analysis,
    trial: Option<Trial>,
    cell_size: f32,
    background: Color,
    show_obstructions: bool,
}

impl ViewState {
    fn new(grid: Grid, config: &Config) -> Result<Self, patrol_sim::GridError> {
        let start = grid.locate_agent()?;
        let analysis = analyze(&grid)?;

        Ok(ViewState {
            grid,
            start,
            analysis,
            trial: None,
            cell_size: config.visual.cell_size,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
            show_obstructions: config.visual.show_obstructions,
        })
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let cell = Position::new((mouse_x / self.cell_size) as i32, (mouse_y / self.cell_size) as i32);
        if !self.grid.in_bounds(cell) {
            return;
        }

        // Left click: try an obstruction on this cell
        if is_mouse_button_pressed(MouseButton::Left) {
            match self.grid.with_obstruction(cell) {
                Ok(trial_grid) => {
                    let mut simulator = Simulator::new(&trial_grid, self.start);
                    let outcome = simulator.run();
                    info!(x = cell.x, y = cell.y, ?outcome, "trial obstruction");
                    self.trial = Some(Trial {
                        cell,
                        visited: simulator.into_visited(),
                        outcome,
                    });
                }
                Err(e) => warn!("{}", e),
            }
        }
        // Right click: back to the unobstructed run
        else if is_mouse_button_pressed(MouseButton::Right) {
            self.trial = None;
        }
    }

    fn shown_visited(&self) -> &VisitedState {
        match &self.trial {
            Some(trial) => &trial.visited,
            None => &self.analysis.visited,
        }
    }

    fn grid_to_string(&self) -> String {
        let obstructions: Vec<Position> = match &self.trial {
            Some(trial) => vec![trial.cell],
            None => self.analysis.search.loop_cells.clone(),
        };
        self.grid.render(self.shown_visited(), &obstructions)
    }

    fn copy_to_clipboard(&self) {
        let grid_string = self.grid_to_string();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&grid_string) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Grid rendering copied to clipboard");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&self) {
        clear_background(self.background);

        let visited = self.shown_visited();
        let loop_cells = &self.analysis.search.loop_cells;

        for y in 0..self.grid.rows {
            for x in 0..self.grid.cols {
                let pos = Position::new(x, y);
                let px = x as f32 * self.cell_size;
                let py = y as f32 * self.cell_size;

                let color = if pos == self.start.position {
                    BLUE // Start
                } else if self.grid.is_wall(pos) {
                    RED
                } else if self.trial.as_ref().is_some_and(|trial| trial.cell == pos) {
                    ORANGE
                } else if self.show_obstructions && self.trial.is_none() && loop_cells.contains(&pos) {
                    YELLOW // Loop-inducing obstruction
                } else if visited.is_visited(pos) {
                    Color::from_rgba(100, 200, 100, 255)
                } else {
                    Color::from_rgba(60, 60, 60, 255)
                };

                draw_rectangle(px, py, self.cell_size - 1.0, self.cell_size - 1.0, color);
            }
        }

        let unobstructed = match self.analysis.visited_cells() {
            Some(count) => format!("Visited cells: {}", count),
            None => "Visited cells: loop".to_string(),
        };
        let trial = match &self.trial {
            Some(trial) => format!(
                "Trial ({}, {}): {}",
                trial.cell.x,
                trial.cell.y,
                match trial.outcome {
                    RunOutcome::Exited { visited_cells } => format!("exits after {} cells", visited_cells),
                    RunOutcome::Looped => "loops".to_string(),
                    RunOutcome::BudgetExceeded => "budget exceeded".to_string(),
                }
            ),
            None => "Trial: none".to_string(),
        };
        let lines = [
            unobstructed,
            format!("Loop obstructions: {}", self.analysis.loop_obstructions()),
            trial,
            "Left click: try obstruction".to_string(),
            "Right click: clear trial".to_string(),
            "O: toggle loop cells".to_string(),
            "C: copy grid to clipboard".to_string(),
            "Esc: close window".to_string(),
        ];

        let text_x = self.grid.cols as f32 * self.cell_size + 10.0;
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, text_x, 20.0 + i as f32 * 22.0, 20.0, WHITE);
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: Config::load().visual.window_title,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load();
    logging::init(&config.logging.filter);

    let layout_path = std::env::args().nth(1).unwrap_or_else(|| config.input.path.clone());
    let grid = match Grid::from_file(&layout_path) {
        Ok(grid) => grid,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let mut state = match ViewState::new(grid, &config) {
        Ok(state) => state,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    loop {
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::O) {
            state.show_obstructions = !state.show_obstructions;
        }

        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();
        next_frame().await;
    }
}
