//! Headless report for a patrol layout
//!
//! Prints the number of cells visited before the agent leaves the grid and
//! the number of single-wall obstructions that trap it in a loop.

use patrol_sim::config::Config;
use patrol_sim::{analyze, logging, Grid, RunOutcome, RunTrace, Simulator};
use std::env;
use std::process;
use tracing::info;

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--render] [layout.txt]", program);
    eprintln!("Without a layout argument, [input] path from config.toml is used");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    logging::init(&config.logging.filter);

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("patrol_report");

    let mut render = false;
    let mut layout_path = None;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--render" => render = true,
            "-h" | "--help" => {
                print_usage(program);
                return Ok(());
            }
            option if option.starts_with('-') => {
                eprintln!("Unknown option: {}", option);
                print_usage(program);
                process::exit(2);
            }
            path => layout_path = Some(path.to_string()),
        }
    }

    let layout_path = layout_path.unwrap_or_else(|| config.input.path.clone());
    info!(path = %layout_path, "loading layout");

    let grid = Grid::from_file(&layout_path)?;
    let analysis = analyze(&grid)?;

    match analysis.unobstructed {
        RunOutcome::Exited { visited_cells } => println!("1: {}", visited_cells),
        RunOutcome::Looped | RunOutcome::BudgetExceeded => println!("1: loop"),
    }
    println!("2: {}", analysis.loop_obstructions());

    if render || config.logging.enable_trace {
        let mut simulator = Simulator::from_grid(&grid)?;
        let mut trace = RunTrace::new();
        simulator.run_traced(&mut trace);

        if config.logging.enable_trace {
            trace.save_to_file(&config.logging.trace_path)?;
            info!(path = %config.logging.trace_path, steps = trace.len(), "saved run trace");
        }

        if render {
            println!();
            print!("{}", grid.render(simulator.visited(), &analysis.search.loop_cells));
            println!();
            println!("{}", trace.summary());
        }
    }

    Ok(())
}
