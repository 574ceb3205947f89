use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use gridpath_core::Point;

use crate::graph::UNREACHABLE;
use crate::search::{Event, SearchResult, reconstruct};
use crate::traits::WeightedPather;

/// Frontier entry, ordered so the `BinaryHeap` (max-heap) pops the
/// cheapest first. Equal costs pop in row-major order.
#[derive(Clone, Copy, Eq, PartialEq)]
struct Entry {
    cost: i32,
    pos: Point,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra shortest-weighted-path explorer.
///
/// Tentative costs start at [`UNREACHABLE`] for every cell except the
/// start. A cell may be pushed several times as cheaper routes are found;
/// entries whose cost no longer matches the best known one are skipped
/// when popped. The search ends once the end cell is popped, which is
/// final because edge weights are positive.
pub struct Dijkstra<'a, P> {
    pather: &'a P,
    start: Point,
    end: Point,
    open: BinaryHeap<Entry>,
    costs: HashMap<Point, i32>,
    closed: HashSet<Point>,
    discovered: HashSet<Point>,
    parents: HashMap<Point, Point>,
    pending: VecDeque<Event>,
    outcome: Option<SearchResult>,
    nbuf: Vec<Point>,
}

impl<'a, P: WeightedPather> Dijkstra<'a, P> {
    /// Prepare a search from `start` to `end`.
    pub fn new(pather: &'a P, start: Point, end: Point) -> Self {
        let mut s = Self {
            pather,
            start,
            end,
            open: BinaryHeap::new(),
            costs: HashMap::new(),
            closed: HashSet::new(),
            discovered: HashSet::new(),
            parents: HashMap::new(),
            pending: VecDeque::new(),
            outcome: None,
            nbuf: Vec::with_capacity(4),
        };
        s.restart();
        s
    }

    /// Rewind to the initial state.
    pub fn restart(&mut self) {
        self.open.clear();
        self.costs.clear();
        self.closed.clear();
        self.discovered.clear();
        self.parents.clear();
        self.pending.clear();
        self.outcome = None;

        if !self.pather.contains(self.start) || !self.pather.contains(self.end) {
            self.outcome = Some(SearchResult::none());
            return;
        }
        if self.start == self.end {
            self.pending.push_back(Event::visited(self.start));
            self.outcome = Some(SearchResult::found(vec![self.start], 0));
            return;
        }
        self.costs.insert(self.start, 0);
        self.open.push(Entry {
            cost: 0,
            pos: self.start,
        });
        self.discovered.insert(self.start);
        self.pending.push_back(Event::frontier(self.start));
    }

    /// The result, once every event has been pulled.
    pub fn outcome(&self) -> Option<&SearchResult> {
        self.outcome.as_ref()
    }

    /// Run to completion and return the result.
    pub fn finish(mut self) -> SearchResult {
        for _ in self.by_ref() {}
        self.outcome.take().unwrap_or_default()
    }

    /// Best known cost to `p`, [`UNREACHABLE`] if none yet.
    pub fn cost_at(&self, p: Point) -> i32 {
        self.costs.get(&p).copied().unwrap_or(UNREACHABLE)
    }

    fn step(&mut self) {
        let Some(Entry { cost, pos }) = self.open.pop() else {
            self.outcome = Some(SearchResult::none());
            return;
        };
        // Skip stale entries.
        if self.closed.contains(&pos) || cost > self.cost_at(pos) {
            return;
        }
        self.closed.insert(pos);
        self.pending.push_back(Event::visited(pos));

        if pos == self.end {
            self.outcome = Some(match reconstruct(&self.parents, self.start, self.end) {
                Some(path) => SearchResult::found(path, cost),
                None => SearchResult::none(),
            });
            return;
        }

        self.nbuf.clear();
        self.pather.neighbors(pos, &mut self.nbuf);
        for &np in self.nbuf.iter() {
            if self.closed.contains(&np) {
                continue;
            }
            let tentative = cost.saturating_add(self.pather.cost(pos, np));
            if tentative >= self.costs.get(&np).copied().unwrap_or(UNREACHABLE) {
                continue;
            }
            self.costs.insert(np, tentative);
            self.parents.insert(np, pos);
            self.open.push(Entry {
                cost: tentative,
                pos: np,
            });
            if self.discovered.insert(np) {
                self.pending.push_back(Event::frontier(np));
            }
        }
    }
}

impl<P: WeightedPather> Iterator for Dijkstra<'_, P> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            if let Some(e) = self.pending.pop_front() {
                return Some(e);
            }
            if self.outcome.is_some() {
                return None;
            }
            self.step();
        }
    }
}

/// Cheapest path from `start` to `end`; cost is the summed edge weight.
pub fn dijkstra<P: WeightedPather>(pather: &P, start: Point, end: Point) -> SearchResult {
    Dijkstra::new(pather, start, end).finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Role;
    use crate::{Graph, bfs};
    use gridpath_core::Grid;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn heap_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        for (cost, x) in [(5, 0), (1, 3), (1, 1), (9, 2)] {
            heap.push(Entry {
                cost,
                pos: p(x, 0),
            });
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.cost, e.pos.x))
            .collect();
        assert_eq!(order, vec![(1, 1), (1, 3), (5, 0), (9, 2)]);
    }

    #[test]
    fn routes_around_expensive_cells() {
        // 3x3 with a costly centre: going round is cheaper than through.
        let mut grid = Grid::new(3, 3);
        grid.set_weight(p(1, 1), 10).unwrap();
        let g = Graph::build(&grid);
        let r = dijkstra(&g, p(0, 1), p(2, 1));
        assert_eq!(r.cost(), Some(4));
        assert!(!r.path().unwrap().contains(&p(1, 1)));
        // BFS takes the direct line regardless.
        assert_eq!(bfs(&g, p(0, 1), p(2, 1)).steps(), 3);
    }

    #[test]
    fn cost_is_charged_on_entry() {
        let mut grid = Grid::new(1, 3);
        grid.set_weight(p(0, 0), 7).unwrap();
        grid.set_weight(p(1, 0), 2).unwrap();
        grid.set_weight(p(2, 0), 3).unwrap();
        let g = Graph::build(&grid);
        assert_eq!(dijkstra(&g, p(0, 0), p(2, 0)).cost(), Some(5));
        assert_eq!(dijkstra(&g, p(2, 0), p(0, 0)).cost(), Some(9));
    }

    #[test]
    fn uniform_weights_match_hop_count() {
        let g = Graph::build(&Grid::new(5, 5));
        let r = dijkstra(&g, p(0, 0), p(4, 4));
        assert_eq!(r.cost(), Some(8));
        assert_eq!(r.steps(), 9);
    }

    #[test]
    fn relaxation_improves_tentative_costs() {
        let mut g = Graph::new();
        // a -> c direct is dear, a -> b -> c is cheap.
        let (a, b, c) = (p(0, 0), p(1, 0), p(2, 0));
        g.add_edge(a, c, 10);
        g.add_edge(a, b, 1);
        g.add_edge(b, c, 1);
        let mut ex = Dijkstra::new(&g, a, c);
        let visits: Vec<Point> = ex
            .by_ref()
            .filter(|e| e.role == Role::Visited)
            .map(|e| e.pos)
            .collect();
        assert_eq!(visits, vec![a, b, c]);
        assert_eq!(ex.cost_at(c), 2);
        assert_eq!(ex.outcome().and_then(SearchResult::cost), Some(2));
        assert_eq!(ex.outcome().and_then(SearchResult::path), Some([a, b, c].as_slice()));
    }
}
