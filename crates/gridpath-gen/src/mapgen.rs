//! Obstacle placement.
//!
//! Every pattern works on the grid's dimensions only; the grid itself is
//! not modified. Apply the returned set with
//! [`Grid::set_obstacles`](gridpath_core::Grid::set_obstacles).

use gridpath_core::{Grid, GridError, ObstacleSet, Point, Range};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngExt};

use crate::config::GenConfig;
use crate::pattern::Pattern;
use crate::repair::RepairReport;

/// Obstacle generator over a caller-supplied random source.
pub struct ObstacleGen<R: Rng> {
    pub rng: R,
    pub config: GenConfig,
}

impl<R: Rng> ObstacleGen<R> {
    /// Create a generator with the default configuration.
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, GenConfig::default())
    }

    /// Create a generator with the given configuration.
    pub fn with_config(rng: R, config: GenConfig) -> Self {
        Self { rng, config }
    }

    /// Pick one of [`Pattern::ALL`] uniformly.
    pub fn random_pattern(&mut self) -> Pattern {
        Pattern::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Pattern::Clusters)
    }

    /// Place obstacles on a grid of `grid`'s size using `pattern`.
    ///
    /// `start` and `end` are never part of the result. Only the maze
    /// pattern guarantees they are connected.
    pub fn generate(&mut self, grid: &Grid, start: Point, end: Point, pattern: Pattern) -> ObstacleSet {
        let bounds = grid.bounds();
        if bounds.is_empty() {
            return ObstacleSet::new();
        }
        let mut set = match pattern {
            Pattern::Maze => self.maze(bounds, start, end),
            Pattern::Clusters => self.clusters(bounds),
            Pattern::Corridors => self.corridors(bounds),
            Pattern::LatticeBars => self.lattice_bars(bounds),
            Pattern::Spiral => self.spiral(bounds),
            Pattern::Scatter => self.scatter(bounds),
            Pattern::Walled => walled(bounds),
        };
        set.retain(|&p| bounds.contains(p) && p != start && p != end);
        log::trace!("{pattern}: placed {} obstacles on {bounds}", set.len());
        set
    }

    /// Place obstacles, then repair connectivity between `start` and `end`.
    ///
    /// Fails only if `start` or `end` is off the grid. An unrepairable layout
    /// is returned as-is with [`RepairOutcome::Exhausted`](crate::RepairOutcome::Exhausted).
    pub fn generate_connected(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        pattern: Pattern,
    ) -> Result<(ObstacleSet, RepairReport), GridError> {
        grid.check(start)?;
        grid.check(end)?;
        let mut set = self.generate(grid, start, end, pattern);
        let report = self.repair(grid, &mut set, start, end);
        Ok((set, report))
    }

    /// Random `v` in `lo..=hi`, falling back to the whole axis when the
    /// preferred span does not fit.
    fn coord_in(&mut self, lo: i32, hi: i32, axis: i32) -> i32 {
        if lo <= hi {
            self.rng.random_range(lo..=hi)
        } else {
            self.rng.random_range(0..axis.max(1))
        }
    }

    fn chance(&mut self, p: f64) -> bool {
        let r: f64 = self.rng.random();
        r < p
    }

    /// Recursive backtracking over the lattice of cells sharing `start`'s
    /// parity. Every lattice cell gets carved and connected, then `end` is
    /// linked to the nearest lattice cell.
    fn maze(&mut self, bounds: Range, start: Point, end: Point) -> ObstacleSet {
        let mut walls: ObstacleSet = bounds.iter().collect();
        let mut dirs = [
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(-2, 0),
            Point::new(0, -2),
        ];

        walls.remove(&start);
        let mut stack = vec![start];
        while let Some(&cur) = stack.last() {
            dirs.shuffle(&mut self.rng);
            let next = dirs
                .iter()
                .map(|&d| (d, cur + d))
                .find(|&(_, n)| bounds.contains(n) && walls.contains(&n));
            match next {
                Some((d, n)) => {
                    walls.remove(&cur.shift(d.x / 2, d.y / 2));
                    walls.remove(&n);
                    stack.push(n);
                }
                None => {
                    stack.pop();
                }
            }
        }

        let mut cur = end;
        walls.remove(&cur);
        if (cur.x - start.x) % 2 != 0 {
            cur.x += if cur.x > bounds.min.x { -1 } else { 1 };
            walls.remove(&cur);
        }
        if (cur.y - start.y) % 2 != 0 {
            cur.y += if cur.y > bounds.min.y { -1 } else { 1 };
            walls.remove(&cur);
        }
        walls
    }

    fn clusters(&mut self, bounds: Range) -> ObstacleSet {
        let (w, h) = (bounds.width(), bounds.height());
        let jitter = self.config.cluster_jitter.max(0);
        let mut set = ObstacleSet::new();
        let n = self.rng.random_range(self.config.cluster_count.clone());
        for _ in 0..n {
            let cx = self.coord_in(3, w - 4, w);
            let cy = self.coord_in(3, h - 4, h);
            let size = self.rng.random_range(self.config.cluster_size.clone());
            for _ in 0..size {
                let dx = self.rng.random_range(-jitter..=jitter);
                let dy = self.rng.random_range(-jitter..=jitter);
                set.insert(Point::new(cx + dx, cy + dy));
            }
        }
        set
    }

    fn corridors(&mut self, bounds: Range) -> ObstacleSet {
        let (w, h) = (bounds.width(), bounds.height());
        let mut set = ObstacleSet::new();

        let rows = match self.rng.random_range(1..=2) {
            1 => vec![h / 2],
            _ => vec![h / 4, 3 * h / 4],
        };
        for y in rows {
            let twin = if y < h - 1 { y + 1 } else { y - 1 };
            for x in 0..w {
                if self.chance(self.config.corridor_density_h) {
                    set.insert(Point::new(x, y));
                    set.insert(Point::new(x, twin));
                }
            }
        }

        let cols = match self.rng.random_range(1..=2) {
            1 => vec![w / 2],
            _ => vec![w / 3, 2 * w / 3],
        };
        for x in cols {
            for y in 0..h {
                if self.chance(self.config.corridor_density_v) {
                    set.insert(Point::new(x, y));
                }
            }
        }
        set
    }

    fn lattice_bars(&mut self, bounds: Range) -> ObstacleSet {
        let (w, h) = (bounds.width(), bounds.height());
        let mut set = ObstacleSet::new();
        for x in (5..w).step_by(self.config.bar_period_x.max(1)) {
            for y in 1..h - 1 {
                if self.chance(self.config.bar_density_x) {
                    set.insert(Point::new(x, y));
                }
            }
        }
        for y in (5..h).step_by(self.config.bar_period_y.max(1)) {
            for x in 1..w - 1 {
                if self.chance(self.config.bar_density_y) {
                    set.insert(Point::new(x, y));
                }
            }
        }
        set
    }

    fn spiral(&self, bounds: Range) -> ObstacleSet {
        let (cx, cy) = (bounds.width() / 2, bounds.height() / 2);
        let max_radius = cx.min(cy) - 2;
        let mut set = ObstacleSet::new();
        for radius in (2..max_radius).step_by(self.config.spiral_ring_step.max(1)) {
            for angle in (0..360).step_by(self.config.spiral_angle_step.max(1)) {
                let rad = f64::from(angle).to_radians();
                let x = cx + (f64::from(radius) * rad.cos()) as i32;
                let y = cy + (f64::from(radius) * rad.sin()) as i32;
                set.insert(Point::new(x, y));
            }
        }
        set
    }

    fn scatter(&mut self, bounds: Range) -> ObstacleSet {
        let mut set = ObstacleSet::new();
        if bounds.width() < 3 || bounds.height() < 3 {
            return set;
        }
        let inner = Range::new(1, 1, bounds.width() - 1, bounds.height() - 1);
        for p in inner.iter() {
            if self.chance(self.config.scatter_chance) {
                set.insert(p);
            }
        }
        set
    }
}

/// Border ring plus horizontal walls every ten rows from row 5, with a gap
/// in the centre column.
fn walled(bounds: Range) -> ObstacleSet {
    let (w, h) = (bounds.width(), bounds.height());
    let mut set: ObstacleSet = bounds
        .iter()
        .filter(|p| p.x == 0 || p.y == 0 || p.x == w - 1 || p.y == h - 1)
        .collect();
    for y in (5..h - 5).step_by(10) {
        for x in 5..w - 5 {
            if x != w / 2 {
                set.insert(Point::new(x, y));
            }
        }
    }
    set
}
