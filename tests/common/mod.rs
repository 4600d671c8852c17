#![allow(dead_code)]

use patrol_sim::{Agent, Grid, Heading};
use proptest::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A layout fixture with its expected results
#[derive(Debug, Clone)]
pub struct StandardCase {
    pub layout: String,
    pub visited: usize,
    pub loops: usize,
}

/// Parse a standard format test file
/// Format:
/// - layout rows (`.`, `#`, `^>v<`)
/// - a blank line
/// - `visited: N` and `loops: N`
pub fn parse_standard_case(path: &Path) -> Result<StandardCase, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;

    let mut layout = String::new();
    let mut lines = contents.lines();
    for line in lines.by_ref() {
        if line.trim().is_empty() {
            break;
        }
        layout.push_str(line);
        layout.push('\n');
    }

    if layout.is_empty() {
        return Err("No layout rows found in test file".into());
    }

    let mut visited = None;
    let mut loops = None;
    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value: usize = value.trim().parse()?;
        match key.trim() {
            "visited" => visited = Some(value),
            "loops" => loops = Some(value),
            _ => {}
        }
    }

    Ok(StandardCase {
        layout,
        visited: visited.ok_or("missing 'visited:' line")?,
        loops: loops.ok_or("missing 'loops:' line")?,
    })
}

/// Rotate a layout 90 degrees clockwise, turning marker headings with it
pub fn rotate_layout_clockwise(layout: &str) -> String {
    let rows: Vec<Vec<char>> = layout
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().collect())
        .collect();
    let height = rows.len();
    let width = rows.first().map(Vec::len).unwrap_or(0);

    let mut result = String::new();
    for new_y in 0..width {
        for new_x in 0..height {
            let symbol = rows[height - 1 - new_x][new_y];
            let rotated = match Heading::from_marker(symbol) {
                Some(heading) => heading.rotate_clockwise().marker(),
                None => symbol,
            };
            result.push(rotated);
        }
        result.push('\n');
    }
    result
}

/// All four clockwise rotations of a layout, starting with the original
pub fn rotations(layout: &str) -> Vec<(&'static str, String)> {
    let quarter = rotate_layout_clockwise(layout);
    let half = rotate_layout_clockwise(&quarter);
    let three_quarters = rotate_layout_clockwise(&half);
    vec![
        ("original", layout.to_string()),
        ("rot90", quarter),
        ("rot180", half),
        ("rot270", three_quarters),
    ]
}

/// Independent check: walk the agent, remembering every full state before
/// each step. Returns `Err(())` on a repeated state, or the number of
/// distinct cells occupied when the agent leaves the grid.
pub fn reference_walk(grid: &Grid, start: Agent) -> Result<usize, ()> {
    let mut seen = HashSet::new();
    let mut agent = start;

    loop {
        if !seen.insert((agent.position, agent.heading)) {
            return Err(());
        }
        let ahead = agent.ahead();
        if !grid.in_bounds(ahead) {
            let cells: HashSet<_> = seen.iter().map(|(pos, _)| *pos).collect();
            return Ok(cells.len());
        }
        if grid.is_wall(ahead) {
            agent.turn();
        } else {
            agent.advance();
        }
    }
}

/// Layouts of up to `max_side` x `max_side` cells with exactly one agent.
/// Each other cell is a wall with probability `wall_weight`.
pub fn layout_strategy(max_side: usize, wall_weight: f64) -> impl Strategy<Value = String> {
    (1..=max_side, 1..=max_side)
        .prop_flat_map(move |(rows, cols)| {
            (
                Just(cols),
                proptest::collection::vec(proptest::bool::weighted(wall_weight), rows * cols),
                0..rows * cols,
                proptest::sample::select(Heading::ALL.to_vec()),
            )
        })
        .prop_map(|(cols, walls, agent_cell, heading)| {
            let mut layout = String::new();
            for (id, wall) in walls.into_iter().enumerate() {
                let symbol = if id == agent_cell {
                    heading.marker()
                } else if wall {
                    '#'
                } else {
                    '.'
                };
                layout.push(symbol);
                if (id + 1) % cols == 0 {
                    layout.push('\n');
                }
            }
            layout
        })
}
