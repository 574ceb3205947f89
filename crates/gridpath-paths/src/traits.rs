use gridpath_core::Point;

/// Minimal search interface: vertex membership and neighbour enumeration.
pub trait Pather {
    /// Whether `p` is a vertex. Searches from or to a non-vertex find no path.
    fn contains(&self, p: Point) -> bool;

    /// Append neighbours of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}
