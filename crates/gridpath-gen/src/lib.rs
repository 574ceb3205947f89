//! Obstacle generation for gridpath grids.
//!
//! [`ObstacleGen`] places obstacles according to a [`Pattern`], never on
//! the start or end cell, and can then run a connectivity repair loop that
//! removes obstacles until the start reaches the end or the retry budget
//! runs out. It also assigns traversal weights ([`WeightMode`]).

pub mod config;
pub mod mapgen;
pub mod pattern;
pub mod repair;
pub mod weights;

pub use config::{GenConfig, RepairConfig};
pub use mapgen::ObstacleGen;
pub use pattern::{ParsePatternError, Pattern};
pub use repair::{RepairOutcome, RepairReport};
pub use weights::WeightMode;
