//! Error types for grid operations.

use std::fmt;

use crate::geom::Point;

/// Errors raised when a grid operation receives malformed input.
///
/// Expected negative outcomes (no path between two cells, a generator
/// that could not connect start and end) are not errors and never show up
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A cell mutation addressed a point outside the grid.
    OutOfBounds { pos: Point, rows: i32, cols: i32 },
    /// A start or end coordinate lies outside the grid.
    InvalidCoordinate { pos: Point, rows: i32, cols: i32 },
    /// A traversal weight below 1 was assigned.
    InvalidWeight { pos: Point, weight: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "cell {pos} is outside the {rows}x{cols} grid")
            }
            Self::InvalidCoordinate { pos, rows, cols } => {
                write!(f, "coordinate {pos} is not on the {rows}x{cols} grid")
            }
            Self::InvalidWeight { pos, weight } => {
                write!(f, "invalid weight {weight} for cell {pos}: must be at least 1")
            }
        }
    }
}

impl std::error::Error for GridError {}
