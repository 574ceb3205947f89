//! **gridpath-core**: the occupancy grid shared by the gridpath crates.
//!
//! This crate provides integer geometry ([`Point`], [`Range`]), the
//! [`Grid`] of obstacle/weight [`Cell`]s that pathfinding and obstacle
//! generation operate on, and the [`GridError`] raised for malformed input.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{Cell, Grid, ObstacleSet};
