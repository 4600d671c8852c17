use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a layout or deriving trial grids from it.
#[derive(Debug, Error)]
pub enum GridError {
    /// Layout text could not be turned into a rectangular grid.
    #[error("malformed grid at line {line}: {reason}")]
    MalformedGrid { line: usize, reason: String },
    /// Row or column count too large for grid coordinates.
    #[error("grid of {rows}x{cols} cells is too large")]
    InvalidDimensions { rows: usize, cols: usize },
    /// No `^>v<` marker in the layout.
    #[error("no agent marker found in grid")]
    NoAgent,
    /// More than one `^>v<` marker in the layout.
    #[error("expected exactly one agent marker, found {count}")]
    MultipleAgents { count: usize },
    /// Obstruction target is not an empty, non-start cell.
    #[error("cannot place obstruction at ({x}, {y}): {reason}")]
    InvalidObstruction { x: i32, y: i32, reason: &'static str },
    #[error("failed to read grid file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
