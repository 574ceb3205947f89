//! Adjacency structure derived from a [`Grid`].

use std::collections::BTreeMap;

use gridpath_core::{Grid, Point};

use crate::traits::{Pather, WeightedPather};

/// Sentinel cost meaning "unreachable".
pub const UNREACHABLE: i32 = i32::MAX;

/// Vertex → (neighbour → edge weight) adjacency map.
///
/// Every vertex is a free cell and every edge joins two free, orthogonally
/// adjacent cells. Edges always exist in both directions. The weight stored
/// for `u → v` is the cost of *entering* `v`, which for a built graph is
/// `v`'s cell weight.
///
/// A `Graph` is derived state: rebuild it with [`Graph::build`] after any
/// change to the grid rather than patching it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adj: BTreeMap<Point, BTreeMap<Point, i32>>,
}

impl Graph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the graph of a grid.
    ///
    /// Deterministic: building twice from the same grid yields equal graphs.
    pub fn build(grid: &Grid) -> Self {
        let mut g = Self::new();
        for (p, cell) in grid.iter() {
            if !cell.obstacle {
                g.add_vertex(p);
            }
        }
        for (p, edges) in g.adj.iter_mut() {
            for n in p.neighbors_4() {
                match grid.cell(n) {
                    Some(nc) if !nc.obstacle => {
                        edges.insert(n, nc.weight);
                    }
                    _ => {}
                }
            }
        }
        g
    }

    /// Add a vertex with no edges. Does nothing if it already exists.
    pub fn add_vertex(&mut self, p: Point) {
        self.adj.entry(p).or_default();
    }

    /// Add an undirected edge carrying the same weight both ways, creating
    /// missing vertices.
    pub fn add_edge(&mut self, u: Point, v: Point, weight: i32) {
        self.adj.entry(u).or_default().insert(v, weight);
        self.adj.entry(v).or_default().insert(u, weight);
    }

    /// Whether `p` is a vertex.
    pub fn contains(&self, p: Point) -> bool {
        self.adj.contains_key(&p)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Vertices in row-major order.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.adj.keys().copied()
    }

    /// Neighbours of `p` with the cost of moving there.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = (Point, i32)> + '_ {
        self.adj
            .get(&p)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(&n, &w)| (n, w)))
    }

    /// Weight of the edge `from → to`, if there is one.
    pub fn edge_weight(&self, from: Point, to: Point) -> Option<i32> {
        self.adj.get(&from)?.get(&to).copied()
    }

    /// Summed edge weight along `path`.
    ///
    /// Returns `None` for an empty path or one that leaves the graph.
    pub fn path_cost(&self, path: &[Point]) -> Option<i32> {
        let first = path.first()?;
        if !self.contains(*first) {
            return None;
        }
        path.windows(2).try_fold(0i32, |acc, w| {
            Some(acc.saturating_add(self.edge_weight(w[0], w[1])?))
        })
    }
}

impl Pather for Graph {
    fn contains(&self, p: Point) -> bool {
        Graph::contains(self, p)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if let Some(edges) = self.adj.get(&p) {
            buf.extend(edges.keys().copied());
        }
    }
}

impl WeightedPather for Graph {
    fn cost(&self, from: Point, to: Point) -> i32 {
        let w = self.edge_weight(from, to);
        debug_assert!(w.is_some(), "dangling edge {from} -> {to}");
        w.unwrap_or(UNREACHABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn open_grid_counts() {
        let g = Graph::build(&Grid::new(3, 4));
        assert_eq!(g.vertex_count(), 12);
        // 3 rows * 3 horizontal + 4 cols * 2 vertical
        assert_eq!(g.edge_count(), 17);
        assert_eq!(g.neighbors(p(0, 0)).count(), 2);
        assert_eq!(g.neighbors(p(1, 1)).count(), 4);
    }

    #[test]
    fn obstacles_are_not_vertices() {
        let mut grid = Grid::new(3, 3);
        grid.set_obstacle(p(1, 1), true).unwrap();
        let g = Graph::build(&grid);
        assert!(!g.contains(p(1, 1)));
        assert_eq!(g.vertex_count(), 8);
        assert!(g.vertices().all(|v| !grid.is_obstacle(v)));
        for v in g.vertices() {
            assert!(g.neighbors(v).all(|(n, _)| n != p(1, 1)));
        }
    }

    #[test]
    fn edges_are_symmetric_and_adjacent() {
        let mut grid = Grid::new(4, 4);
        grid.set_obstacle(p(2, 1), true).unwrap();
        grid.set_obstacle(p(0, 3), true).unwrap();
        let g = Graph::build(&grid);
        for u in g.vertices() {
            for (v, _) in g.neighbors(u) {
                assert!(u.is_adjacent(v));
                assert!(g.edge_weight(v, u).is_some());
            }
        }
    }

    #[test]
    fn entering_a_cell_costs_its_weight() {
        let mut grid = Grid::new(1, 2);
        grid.set_weight(p(0, 0), 3).unwrap();
        grid.set_weight(p(1, 0), 8).unwrap();
        let g = Graph::build(&grid);
        assert_eq!(g.edge_weight(p(0, 0), p(1, 0)), Some(8));
        assert_eq!(g.edge_weight(p(1, 0), p(0, 0)), Some(3));
        assert_eq!(g.cost(p(0, 0), p(1, 0)), 8);
    }

    #[test]
    fn build_is_idempotent() {
        let mut grid = Grid::new(5, 6);
        grid.set_obstacle(p(3, 2), true).unwrap();
        grid.set_weight(p(1, 4), 5).unwrap();
        assert_eq!(Graph::build(&grid), Graph::build(&grid));
    }

    #[test]
    fn add_edge_is_symmetric() {
        let mut g = Graph::new();
        g.add_edge(p(0, 0), p(1, 0), 4);
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_weight(p(1, 0), p(0, 0)), Some(4));
    }

    #[test]
    fn path_cost_sums_entering_weights() {
        let mut grid = Grid::new(1, 3);
        grid.set_weight(p(1, 0), 2).unwrap();
        grid.set_weight(p(2, 0), 5).unwrap();
        let g = Graph::build(&grid);
        assert_eq!(g.path_cost(&[p(0, 0), p(1, 0), p(2, 0)]), Some(7));
        assert_eq!(g.path_cost(&[p(2, 0), p(1, 0), p(0, 0)]), Some(3));
        assert_eq!(g.path_cost(&[p(0, 0)]), Some(0));
        assert_eq!(g.path_cost(&[p(0, 0), p(2, 0)]), None);
        assert_eq!(g.path_cost(&[]), None);
    }
}
