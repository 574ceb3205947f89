//! Connectivity repair.
//!
//! After placement, the grid's graph is rebuilt and probed with BFS. While
//! the end is unreachable, a random sample of the obstacles is removed and
//! the probe repeats, up to [`RepairConfig::max_rounds`](crate::RepairConfig)
//! times. Running out of rounds is not an error: the best-effort layout is
//! kept and the search engine will simply report no path.

use gridpath_core::{Grid, ObstacleSet, Point};
use gridpath_paths::{Graph, connected};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::mapgen::ObstacleGen;

/// How a repair run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Start and end were already connected.
    Connected,
    /// Removing obstacles connected them.
    Repaired,
    /// The round budget ran out before they were connected.
    Exhausted,
}

/// Summary of a repair run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    pub outcome: RepairOutcome,
    /// Removal rounds performed.
    pub rounds: usize,
    /// Obstacles removed in total.
    pub removed: usize,
    /// Obstacle count before the first round and after each round.
    pub history: Vec<usize>,
}

impl RepairReport {
    /// Whether start and end ended up connected.
    pub fn is_connected(&self) -> bool {
        self.outcome != RepairOutcome::Exhausted
    }

    /// Obstacles left after the last round.
    pub fn remaining(&self) -> usize {
        self.history.last().copied().unwrap_or(0)
    }
}

impl<R: Rng> ObstacleGen<R> {
    /// Remove obstacles from `obstacles` until `start` reaches `end` on a
    /// grid of `grid`'s size and weights, or the round budget runs out.
    ///
    /// `start`, `end` and any points off the grid are dropped from the set
    /// first. Each round removes `removal_fraction` of the remaining
    /// obstacles, at least one and at most `max_removals`, so the count
    /// strictly decreases.
    pub fn repair(
        &mut self,
        grid: &Grid,
        obstacles: &mut ObstacleSet,
        start: Point,
        end: Point,
    ) -> RepairReport {
        obstacles.retain(|&p| grid.contains(p) && p != start && p != end);
        let max_rounds = self.config.repair.max_rounds;
        let mut report = RepairReport {
            outcome: RepairOutcome::Exhausted,
            rounds: 0,
            removed: 0,
            history: vec![obstacles.len()],
        };

        loop {
            if reachable(grid, obstacles, start, end) {
                report.outcome = if report.rounds == 0 {
                    RepairOutcome::Connected
                } else {
                    RepairOutcome::Repaired
                };
                return report;
            }
            if report.rounds >= max_rounds || obstacles.is_empty() {
                break;
            }

            let n = self.removal_count(obstacles.len());
            let mut pool: Vec<Point> = obstacles.iter().copied().collect();
            pool.shuffle(&mut self.rng);
            for p in pool.into_iter().take(n) {
                obstacles.remove(&p);
            }
            report.rounds += 1;
            report.removed += n;
            report.history.push(obstacles.len());
            log::debug!(
                "repair round {}: removed {n}, {} obstacles left",
                report.rounds,
                obstacles.len()
            );
        }

        log::warn!(
            "generation exhausted: {start} -> {end} still unreachable after {} rounds, {} obstacles kept",
            report.rounds,
            obstacles.len()
        );
        report
    }

    fn removal_count(&self, len: usize) -> usize {
        let cfg = &self.config.repair;
        let share = (len as f64 * cfg.removal_fraction).floor() as usize;
        share.clamp(1, cfg.max_removals.max(1)).min(len)
    }
}

/// BFS probe on `grid` with its obstacles replaced by `obstacles`.
fn reachable(grid: &Grid, obstacles: &ObstacleSet, start: Point, end: Point) -> bool {
    let mut probe = grid.clone();
    if probe.set_obstacles(obstacles).is_err() {
        return false;
    }
    connected(&Graph::build(&probe), start, end)
}
