//! Tuning knobs for obstacle generation and repair.

use std::ops::RangeInclusive;

/// Budget for the connectivity repair loop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairConfig {
    /// Maximum number of removal rounds.
    pub max_rounds: usize,
    /// Share of the current obstacles removed per round.
    pub removal_fraction: f64,
    /// Upper bound on removals per round.
    pub max_removals: usize,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            removal_fraction: 0.25,
            max_removals: 10,
        }
    }
}

/// Parameters of the placement patterns.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenConfig {
    /// How many clusters to scatter.
    pub cluster_count: RangeInclusive<usize>,
    /// Obstacle cells dropped per cluster.
    pub cluster_size: RangeInclusive<usize>,
    /// Maximum offset of a cluster cell from its centre on each axis.
    pub cluster_jitter: i32,
    /// Fill chance of the two-cell-thick horizontal corridor bands.
    pub corridor_density_h: f64,
    /// Fill chance of the vertical corridor bands.
    pub corridor_density_v: f64,
    /// Column spacing of vertical lattice bars.
    pub bar_period_x: usize,
    /// Row spacing of horizontal lattice bars.
    pub bar_period_y: usize,
    /// Fill chance of vertical lattice bars.
    pub bar_density_x: f64,
    /// Fill chance of horizontal lattice bars.
    pub bar_density_y: f64,
    /// Per-cell obstacle chance of the scatter pattern.
    pub scatter_chance: f64,
    /// Radius step between spiral rings.
    pub spiral_ring_step: usize,
    /// Angle step in degrees between obstacles on a spiral ring.
    pub spiral_angle_step: usize,
    /// Upper bound of random cell weights.
    pub max_weight: i32,
    pub repair: RepairConfig,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            cluster_count: 4..=7,
            cluster_size: 8..=15,
            cluster_jitter: 3,
            corridor_density_h: 0.8,
            corridor_density_v: 0.7,
            bar_period_x: 8,
            bar_period_y: 6,
            bar_density_x: 0.7,
            bar_density_y: 0.6,
            scatter_chance: 0.2,
            spiral_ring_step: 3,
            spiral_angle_step: 15,
            max_weight: 15,
            repair: RepairConfig::default(),
        }
    }
}
