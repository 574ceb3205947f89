//! The occupancy grid: a fixed `rows × cols` lattice of [`Cell`]s.
//!
//! A [`Grid`] is an owned value. Pathfinding derives its graph from a
//! borrowed grid and obstacle generation reads the grid's dimensions, so
//! no state is shared behind the caller's back.

use std::collections::BTreeSet;

use crate::error::GridError;
use crate::geom::{Point, Range};

/// A set of obstacle coordinates, ordered row-major.
pub type ObstacleSet = BTreeSet<Point>;

/// Per-cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Whether the cell blocks movement.
    pub obstacle: bool,
    /// Cost charged for entering the cell. Always at least 1.
    pub weight: i32,
}

impl Cell {
    /// A free cell with weight 1.
    pub const FREE: Self = Self {
        obstacle: false,
        weight: 1,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::FREE
    }
}

/// A 2D grid of [`Cell`]s, stored row-major.
///
/// Coordinates are `(x, y)` with `0 <= x < cols` and `0 <= y < rows`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where every cell is free with weight 1.
    ///
    /// Negative dimensions are treated as zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            rows,
            cols,
            cells: vec![Cell::FREE; (rows as usize) * (cols as usize)],
        }
    }

    /// Number of rows (height).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns (width).
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The grid rectangle `[0, 0) - (cols, rows)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies on the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.cols + p.x) as usize)
    }

    /// Validate a start/end coordinate.
    pub fn check(&self, p: Point) -> Result<(), GridError> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(GridError::InvalidCoordinate {
                pos: p,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn out_of_bounds(&self, p: Point) -> GridError {
        GridError::OutOfBounds {
            pos: p,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Get the cell at a point, or `None` if out of bounds.
    pub fn cell(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is an obstacle. Out-of-bounds points count as blocked.
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.cell(p).is_none_or(|c| c.obstacle)
    }

    /// Traversal weight at `p`, or `None` if out of bounds.
    pub fn weight(&self, p: Point) -> Option<i32> {
        self.cell(p).map(|c| c.weight)
    }

    /// Mark or clear an obstacle.
    pub fn set_obstacle(&mut self, p: Point, obstacle: bool) -> Result<(), GridError> {
        let i = self.index(p).ok_or_else(|| self.out_of_bounds(p))?;
        self.cells[i].obstacle = obstacle;
        Ok(())
    }

    /// Assign the cost of entering `p`. Rejects weights below 1.
    pub fn set_weight(&mut self, p: Point, weight: i32) -> Result<(), GridError> {
        let i = self.index(p).ok_or_else(|| self.out_of_bounds(p))?;
        if weight < 1 {
            return Err(GridError::InvalidWeight { pos: p, weight });
        }
        self.cells[i].weight = weight;
        Ok(())
    }

    /// Collect the coordinates of every obstacle.
    pub fn obstacles(&self) -> ObstacleSet {
        self.iter()
            .filter(|(_, c)| c.obstacle)
            .map(|(p, _)| p)
            .collect()
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.obstacle).count()
    }

    /// Clear every obstacle, keeping weights.
    pub fn clear_obstacles(&mut self) {
        for c in self.cells.iter_mut() {
            c.obstacle = false;
        }
    }

    /// Replace the obstacle layout wholesale.
    ///
    /// Every point of `obstacles` must lie on the grid; otherwise the grid
    /// is left untouched and the first offending point is reported.
    pub fn set_obstacles(&mut self, obstacles: &ObstacleSet) -> Result<(), GridError> {
        if let Some(&p) = obstacles.iter().find(|&&p| !self.contains(p)) {
            return Err(self.out_of_bounds(p));
        }
        self.clear_obstacles();
        for &p in obstacles {
            if let Some(i) = self.index(p) {
                self.cells[i].obstacle = true;
            }
        }
        Ok(())
    }

    /// Reset every cell to free with weight 1.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::FREE);
    }

    /// Iterate over `(Point, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_free_with_unit_weights() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.len(), 12);
        assert_eq!(g.obstacle_count(), 0);
        assert!(g.iter().all(|(_, c)| c == Cell::FREE));
        assert_eq!(g.cell(Point::new(3, 2)), Some(Cell::FREE));
        assert_eq!(g.cell(Point::new(4, 2)), None);
    }

    #[test]
    fn negative_dimensions_give_empty_grid() {
        let g = Grid::new(-2, 5);
        assert!(g.is_empty());
        assert!(!g.contains(Point::ZERO));
    }

    #[test]
    fn set_obstacle_and_bounds() {
        let mut g = Grid::new(2, 2);
        g.set_obstacle(Point::new(1, 0), true).unwrap();
        assert!(g.is_obstacle(Point::new(1, 0)));
        assert!(!g.is_obstacle(Point::new(0, 0)));
        assert!(g.is_obstacle(Point::new(5, 5)));
        assert_eq!(
            g.set_obstacle(Point::new(2, 0), true),
            Err(GridError::OutOfBounds {
                pos: Point::new(2, 0),
                rows: 2,
                cols: 2,
            })
        );
        g.set_obstacle(Point::new(1, 0), false).unwrap();
        assert_eq!(g.obstacle_count(), 0);
    }

    #[test]
    fn weights_below_one_are_rejected() {
        let mut g = Grid::new(2, 2);
        let p = Point::new(1, 1);
        g.set_weight(p, 7).unwrap();
        assert_eq!(g.weight(p), Some(7));
        assert_eq!(
            g.set_weight(p, 0),
            Err(GridError::InvalidWeight { pos: p, weight: 0 })
        );
        assert!(g.set_weight(p, -3).is_err());
        assert_eq!(g.weight(p), Some(7));
    }

    #[test]
    fn set_obstacles_replaces_layout() {
        let mut g = Grid::new(3, 3);
        g.set_obstacle(Point::new(0, 0), true).unwrap();
        let set: ObstacleSet = [Point::new(1, 1), Point::new(2, 1)].into_iter().collect();
        g.set_obstacles(&set).unwrap();
        assert_eq!(g.obstacles(), set);

        let bad: ObstacleSet = [Point::new(0, 2), Point::new(7, 7)].into_iter().collect();
        assert!(g.set_obstacles(&bad).is_err());
        assert_eq!(g.obstacles(), set);
    }

    #[test]
    fn reset_clears_everything() {
        let mut g = Grid::new(2, 3);
        g.set_obstacle(Point::new(2, 1), true).unwrap();
        g.set_weight(Point::new(0, 0), 9).unwrap();
        g.reset();
        assert_eq!(g, Grid::new(2, 3));
    }

    #[test]
    fn check_reports_invalid_coordinate() {
        let g = Grid::new(2, 2);
        assert!(g.check(Point::new(1, 1)).is_ok());
        assert!(matches!(
            g.check(Point::new(-1, 0)),
            Err(GridError::InvalidCoordinate { .. })
        ));
    }
}
