//! Search results, exploration events and algorithm dispatch.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use gridpath_core::{Grid, GridError, Point};

use crate::bfs::Bfs;
use crate::dfs::Dfs;
use crate::dijkstra::Dijkstra;
use crate::graph::Graph;
use crate::traits::{Pather, WeightedPather};

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The available search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::Dijkstra];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Dijkstra => "Dijkstra",
        })
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "dijkstra" => Ok(Self::Dijkstra),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// What happened to a cell during exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// The cell entered the frontier for the first time.
    Frontier,
    /// The cell was taken off the frontier and expanded.
    Visited,
}

/// One exploration step, in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub pos: Point,
    pub role: Role,
}

impl Event {
    pub(crate) fn frontier(pos: Point) -> Self {
        Self {
            pos,
            role: Role::Frontier,
        }
    }

    pub(crate) fn visited(pos: Point) -> Self {
        Self {
            pos,
            role: Role::Visited,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// Outcome of a search.
///
/// `path` runs from start to end inclusive. `cost` is the hop count for BFS
/// and DFS and the summed edge weight for Dijkstra. Both are `None` when no
/// path exists, which is a normal outcome rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub path: Option<Vec<Point>>,
    pub cost: Option<i32>,
}

impl SearchResult {
    /// The "no path" result.
    pub fn none() -> Self {
        Self::default()
    }

    pub(crate) fn found(path: Vec<Point>, cost: i32) -> Self {
        Self {
            path: Some(path),
            cost: Some(cost),
        }
    }

    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// The path, if any.
    pub fn path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }

    /// The path cost, if any.
    pub fn cost(&self) -> Option<i32> {
        self.cost
    }

    /// Number of cells on the path, 0 when there is none.
    pub fn steps(&self) -> usize {
        self.path.as_ref().map_or(0, Vec::len)
    }
}

/// Walk predecessor links back from `end` to `start`.
pub(crate) fn reconstruct(
    parents: &HashMap<Point, Point>,
    start: Point,
    end: Point,
) -> Option<Vec<Point>> {
    let mut path = vec![end];
    let mut cur = end;
    while cur != start {
        cur = *parents.get(&cur)?;
        path.push(cur);
        if path.len() > parents.len() + 1 {
            // cycle in the predecessor map
            return None;
        }
    }
    path.reverse();
    Some(path)
}

// ---------------------------------------------------------------------------
// Explorer
// ---------------------------------------------------------------------------

/// A search of any [`Algorithm`], stepped lazily through its [`Event`]s.
pub enum Explorer<'a, P> {
    Bfs(Bfs<'a, P>),
    Dfs(Dfs<'a, P>),
    Dijkstra(Dijkstra<'a, P>),
}

impl<'a, P: WeightedPather> Explorer<'a, P> {
    /// Prepare a search from `start` to `end`.
    pub fn new(algorithm: Algorithm, pather: &'a P, start: Point, end: Point) -> Self {
        match algorithm {
            Algorithm::Bfs => Self::Bfs(Bfs::new(pather, start, end)),
            Algorithm::Dfs => Self::Dfs(Dfs::new(pather, start, end)),
            Algorithm::Dijkstra => Self::Dijkstra(Dijkstra::new(pather, start, end)),
        }
    }

    /// The algorithm being run.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Bfs(_) => Algorithm::Bfs,
            Self::Dfs(_) => Algorithm::Dfs,
            Self::Dijkstra(_) => Algorithm::Dijkstra,
        }
    }

    /// Rewind to the initial state so the events can be replayed.
    pub fn restart(&mut self) {
        match self {
            Self::Bfs(s) => s.restart(),
            Self::Dfs(s) => s.restart(),
            Self::Dijkstra(s) => s.restart(),
        }
    }

    /// The result, once every event has been pulled.
    pub fn outcome(&self) -> Option<&SearchResult> {
        match self {
            Self::Bfs(s) => s.outcome(),
            Self::Dfs(s) => s.outcome(),
            Self::Dijkstra(s) => s.outcome(),
        }
    }

    /// Run to completion and return the result.
    pub fn finish(self) -> SearchResult {
        match self {
            Self::Bfs(s) => s.finish(),
            Self::Dfs(s) => s.finish(),
            Self::Dijkstra(s) => s.finish(),
        }
    }
}

impl<P: WeightedPather> Iterator for Explorer<'_, P> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        match self {
            Self::Bfs(s) => s.next(),
            Self::Dfs(s) => s.next(),
            Self::Dijkstra(s) => s.next(),
        }
    }
}

/// Run `algorithm` from `start` to `end`.
pub fn search<P: WeightedPather>(
    algorithm: Algorithm,
    pather: &P,
    start: Point,
    end: Point,
) -> SearchResult {
    let mut explorer = Explorer::new(algorithm, pather, start, end);
    let explored = explorer
        .by_ref()
        .filter(|e| e.role == Role::Visited)
        .count();
    let result = explorer.finish();
    log::trace!(
        "{algorithm} {start} -> {end}: explored {explored}, path of {} cells",
        result.steps()
    );
    result
}

/// Whether `b` is reachable from `a`.
pub fn connected<P: Pather>(pather: &P, a: Point, b: Point) -> bool {
    Bfs::new(pather, a, b).finish().is_found()
}

/// Build the graph of `grid` and search it from `start` to `end`.
///
/// Coordinates off the grid are rejected; coordinates on an obstacle simply
/// yield no path.
pub fn find_path(
    grid: &Grid,
    start: Point,
    end: Point,
    algorithm: Algorithm,
) -> Result<SearchResult, GridError> {
    grid.check(start)?;
    grid.check(end)?;
    let graph = Graph::build(grid);
    Ok(search(algorithm, &graph, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    /// 3x3 grid with row 1 blocked except its middle cell.
    fn gate_grid() -> Grid {
        let mut grid = Grid::new(3, 3);
        grid.set_obstacle(p(0, 1), true).unwrap();
        grid.set_obstacle(p(2, 1), true).unwrap();
        grid
    }

    #[test]
    fn open_five_by_five_corner_to_corner() {
        let grid = Grid::new(5, 5);
        for algorithm in [Algorithm::Bfs, Algorithm::Dijkstra] {
            let r = find_path(&grid, p(0, 0), p(4, 4), algorithm).unwrap();
            assert_eq!(r.steps(), 9, "{algorithm}");
            assert_eq!(r.cost(), Some(8), "{algorithm}");
        }
    }

    #[test]
    fn forced_path_through_gate() {
        let grid = gate_grid();
        let expected = vec![p(0, 0), p(1, 0), p(1, 1), p(1, 2), p(2, 2)];
        for algorithm in Algorithm::ALL {
            let r = find_path(&grid, p(0, 0), p(2, 2), algorithm).unwrap();
            assert_eq!(r.path(), Some(expected.as_slice()), "{algorithm}");
            assert_eq!(r.cost(), Some(4), "{algorithm}");
        }
    }

    #[test]
    fn start_equals_end() {
        let mut grid = Grid::new(4, 4);
        grid.set_obstacle(p(1, 2), true).unwrap();
        for algorithm in Algorithm::ALL {
            let r = find_path(&grid, p(2, 2), p(2, 2), algorithm).unwrap();
            assert_eq!(r.path(), Some([p(2, 2)].as_slice()), "{algorithm}");
            assert_eq!(r.cost(), Some(0), "{algorithm}");
        }
    }

    #[test]
    fn obstacle_endpoints_give_no_path() {
        let grid = gate_grid();
        for algorithm in Algorithm::ALL {
            let r = find_path(&grid, p(0, 1), p(2, 2), algorithm).unwrap();
            assert_eq!(r, SearchResult::none(), "{algorithm}");
            let r = find_path(&grid, p(0, 0), p(2, 1), algorithm).unwrap();
            assert!(!r.is_found(), "{algorithm}");
            assert_eq!(r.steps(), 0);
        }
    }

    #[test]
    fn off_grid_endpoints_are_errors() {
        let grid = Grid::new(3, 3);
        let err = find_path(&grid, p(0, 0), p(3, 0), Algorithm::Bfs).unwrap_err();
        assert!(matches!(err, GridError::InvalidCoordinate { .. }));
        // The graph-level search treats them as an ordinary miss.
        let graph = Graph::build(&grid);
        assert!(!search(Algorithm::Dijkstra, &graph, p(-1, 0), p(0, 0)).is_found());
    }

    #[test]
    fn walled_off_end_gives_no_path() {
        let mut grid = Grid::new(3, 3);
        for x in 0..3 {
            grid.set_obstacle(p(x, 1), true).unwrap();
        }
        for algorithm in Algorithm::ALL {
            let r = find_path(&grid, p(0, 0), p(2, 2), algorithm).unwrap();
            assert!(!r.is_found(), "{algorithm}");
        }
        assert!(!connected(&Graph::build(&grid), p(0, 0), p(2, 2)));
        assert!(connected(&Graph::build(&grid), p(0, 0), p(2, 0)));
    }

    #[test]
    fn algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            let parsed: Algorithm = algorithm.to_string().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
        assert!("astar".parse::<Algorithm>().is_err());
    }

    #[test]
    fn explorer_replays_after_restart() {
        let graph = Graph::build(&gate_grid());
        for algorithm in Algorithm::ALL {
            let mut ex = Explorer::new(algorithm, &graph, p(0, 0), p(2, 2));
            assert_eq!(ex.algorithm(), algorithm);
            let first: Vec<Event> = ex.by_ref().collect();
            assert!(ex.outcome().is_some_and(SearchResult::is_found));
            ex.restart();
            assert!(ex.outcome().is_none());
            let second: Vec<Event> = ex.by_ref().collect();
            assert_eq!(first, second, "{algorithm}");
            assert!(first.iter().any(|e| e.role == Role::Visited));
        }
    }

    #[test]
    fn events_announce_frontier_before_visit() {
        let graph = Graph::build(&Grid::new(4, 4));
        for algorithm in Algorithm::ALL {
            let ex = Explorer::new(algorithm, &graph, p(0, 0), p(3, 3));
            let mut seen = std::collections::HashSet::new();
            for e in ex {
                match e.role {
                    Role::Frontier => assert!(seen.insert(e.pos), "{algorithm}: {e:?}"),
                    Role::Visited => assert!(seen.contains(&e.pos), "{algorithm}: {e:?}"),
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Optimality against a brute-force reference
    // -----------------------------------------------------------------------

    /// Relax every edge until nothing changes.
    fn reference_costs(graph: &Graph, start: Point, unit: bool) -> HashMap<Point, i32> {
        let mut dist = HashMap::new();
        dist.insert(start, 0);
        loop {
            let mut changed = false;
            for u in graph.vertices() {
                let Some(&du) = dist.get(&u) else { continue };
                for (v, w) in graph.neighbors(u) {
                    let cand = du + if unit { 1 } else { w };
                    if dist.get(&v).is_none_or(|&dv| cand < dv) {
                        dist.insert(v, cand);
                        changed = true;
                    }
                }
            }
            if !changed {
                return dist;
            }
        }
    }

    fn assert_valid_path(graph: &Graph, path: &[Point], start: Point, end: Point) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for w in path.windows(2) {
            assert!(graph.edge_weight(w[0], w[1]).is_some(), "{} -> {}", w[0], w[1]);
        }
    }

    fn arb_grid() -> impl Strategy<Value = (Grid, Point, Point)> {
        (2i32..7, 2i32..7).prop_flat_map(|(rows, cols)| {
            let n = (rows * cols) as usize;
            (
                Just((rows, cols)),
                prop::collection::vec((prop::bool::weighted(0.3), 1i32..6), n),
                0..n,
                0..n,
            )
                .prop_map(|((rows, cols), cells, s, e)| {
                    let mut grid = Grid::new(rows, cols);
                    let pts: Vec<Point> = grid.bounds().iter().collect();
                    for (&pt, &(obstacle, weight)) in pts.iter().zip(cells.iter()) {
                        grid.set_obstacle(pt, obstacle).unwrap();
                        grid.set_weight(pt, weight).unwrap();
                    }
                    (grid, pts[s], pts[e])
                })
        })
    }

    proptest! {
        #[test]
        fn bfs_finds_fewest_hops((grid, start, end) in arb_grid()) {
            let graph = Graph::build(&grid);
            let result = search(Algorithm::Bfs, &graph, start, end);
            let reference = if graph.contains(start) && graph.contains(end) {
                reference_costs(&graph, start, true).get(&end).copied()
            } else {
                None
            };
            prop_assert_eq!(result.cost(), reference);
            if let Some(path) = result.path() {
                assert_valid_path(&graph, path, start, end);
                prop_assert_eq!(path.len() as i32 - 1, reference.unwrap_or(-1));
            }
        }

        #[test]
        fn dijkstra_finds_cheapest((grid, start, end) in arb_grid()) {
            let graph = Graph::build(&grid);
            let result = search(Algorithm::Dijkstra, &graph, start, end);
            let reference = if graph.contains(start) && graph.contains(end) {
                reference_costs(&graph, start, false).get(&end).copied()
            } else {
                None
            };
            prop_assert_eq!(result.cost(), reference);
            if let Some(path) = result.path() {
                assert_valid_path(&graph, path, start, end);
                prop_assert_eq!(graph.path_cost(path), result.cost());
            }
        }

        #[test]
        fn dfs_agrees_on_reachability((grid, start, end) in arb_grid()) {
            let graph = Graph::build(&grid);
            let bfs = search(Algorithm::Bfs, &graph, start, end);
            let dfs = search(Algorithm::Dfs, &graph, start, end);
            prop_assert_eq!(bfs.is_found(), dfs.is_found());
            if let Some(path) = dfs.path() {
                assert_valid_path(&graph, path, start, end);
                prop_assert_eq!(dfs.cost(), Some(path.len() as i32 - 1));
                prop_assert!(dfs.cost() >= bfs.cost());
                let distinct: std::collections::HashSet<_> = path.iter().collect();
                prop_assert_eq!(distinct.len(), path.len());
            }
        }
    }
}
