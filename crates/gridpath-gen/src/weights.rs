//! Traversal weight assignment.

use std::fmt;
use std::str::FromStr;

use gridpath_core::{Grid, GridError, Point};
use rand::{Rng, RngExt};

use crate::mapgen::ObstacleGen;

/// How cell weights are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightMode {
    /// Every cell costs 1.
    #[default]
    Uniform,
    /// Free cells other than start and end cost a random amount.
    Random,
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeightMode::Uniform => "uniform",
            WeightMode::Random => "random",
        })
    }
}

impl FromStr for WeightMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(WeightMode::Uniform),
            "random" => Ok(WeightMode::Random),
            _ => Err(format!("unknown weight mode: {s}")),
        }
    }
}

impl<R: Rng> ObstacleGen<R> {
    /// Reassign every weight of `grid` according to `mode`.
    ///
    /// Apply after the obstacles are in place: obstacles, `start` and `end`
    /// keep weight 1. Random weights fall in `1..=max_weight`.
    pub fn apply_weights(
        &mut self,
        grid: &mut Grid,
        mode: WeightMode,
        start: Point,
        end: Point,
    ) -> Result<(), GridError> {
        let hi = self.config.max_weight.max(1);
        let cells: Vec<_> = grid.iter().collect();
        for (p, cell) in cells {
            let w = match mode {
                WeightMode::Random if !cell.obstacle && p != start && p != end => {
                    self.rng.random_range(1..=hi)
                }
                _ => 1,
            };
            grid.set_weight(p, w)?;
        }
        log::trace!("{mode} weights applied to {}x{} grid", grid.rows(), grid.cols());
        Ok(())
    }
}
